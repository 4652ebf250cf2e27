//! Module: key::builder
//! Responsibility: lowering per-field candidate ranges into one packed row key.
//! Does not own: range intersection against an existing scan.
//! Boundary: `ScanBounds` and skip-scan callers build start/stop keys here.

use crate::{
    SEPARATOR_BYTE,
    error::InternalError,
    key::successor::next_key,
    obs::sink::{MetricsEvent, record},
    range::{KeyRange, RangeBound},
    schema::RowKeySchema,
};
use thiserror::Error as ThisError;

///
/// SlotError
///
/// Contract violation between the compiler-produced slots and the schema.
/// These indicate an upstream bug and are never recovered from.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SlotError {
    #[error("{slots} slots exceed the {fields} row key fields")]
    TooManySlots { slots: usize, fields: usize },

    #[error("slot {index} has no candidate ranges")]
    EmptySlot { index: usize },

    #[error("position vector has {positions} entries for {slots} slots")]
    PositionArity { positions: usize, slots: usize },

    #[error("position {position} out of range for slot {index} with {len} candidates")]
    PositionOutOfRange {
        index: usize,
        position: usize,
        len: usize,
    },

    #[error("start slot {start} out of range for {slots} slots")]
    StartSlotOutOfRange { start: usize, slots: usize },
}

///
/// KeyWrite
///
/// Outcome of appending one bound's fields to a key buffer.
/// `Unbounded` means the bound has no finite key from the start slot on and
/// the caller must treat that side as open.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyWrite {
    Written(usize),
    Unbounded,
}

impl KeyWrite {
    #[must_use]
    pub const fn written(self) -> Option<usize> {
        match self {
            Self::Written(len) => Some(len),
            Self::Unbounded => None,
        }
    }
}

///
/// CompositeKeyBuilder
///
/// Builds minimal and maximal packed row keys from one candidate-range list
/// per schema field. Slots may stop before the last field; trailing fields
/// then contribute nothing.
///

#[derive(Clone, Copy, Debug)]
pub struct CompositeKeyBuilder<'a> {
    schema: &'a RowKeySchema,
    slots: &'a [Vec<KeyRange>],
}

impl<'a> CompositeKeyBuilder<'a> {
    /// Validate `slots` against `schema` and bind them for key building.
    pub fn new(
        schema: &'a RowKeySchema,
        slots: &'a [Vec<KeyRange>],
    ) -> Result<Self, InternalError> {
        if slots.len() > schema.max_fields() {
            return Err(SlotError::TooManySlots {
                slots: slots.len(),
                fields: schema.max_fields(),
            }
            .into());
        }
        if let Some(index) = slots.iter().position(Vec::is_empty) {
            return Err(SlotError::EmptySlot { index }.into());
        }

        Ok(Self { schema, slots })
    }

    #[must_use]
    pub const fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Smallest key any combination of slot ranges can produce, or `None`
    /// when the lower side is unbounded.
    pub fn min_key(&self) -> Result<Option<Vec<u8>>, InternalError> {
        let position = vec![0; self.slots.len()];

        self.key_at(&position, RangeBound::Lower)
    }

    /// Exclusive stop key past every combination of slot ranges, or `None`
    /// when the upper side is unbounded.
    pub fn max_key(&self) -> Result<Option<Vec<u8>>, InternalError> {
        let position: Vec<usize> = self.slots.iter().map(|slot| slot.len() - 1).collect();

        self.key_at(&position, RangeBound::Upper)
    }

    /// Materialize the `bound` key for one chosen candidate per slot.
    pub fn key_at(
        &self,
        position: &[usize],
        bound: RangeBound,
    ) -> Result<Option<Vec<u8>>, InternalError> {
        if self.slots.is_empty() {
            return Ok(None);
        }
        self.check_position(position)?;

        // Phase 1: size the buffer for the selected bounds plus separators.
        let capacity = self
            .slots
            .iter()
            .zip(position)
            .enumerate()
            .map(|(index, (slot, &at))| {
                slot[at].range(bound).len() + usize::from(self.schema.writes_separator(index))
            })
            .sum();
        let mut buffer = Vec::with_capacity(capacity);

        // Phase 2: write fields and map the outcome onto an optional key.
        let key = match self.set_key(position, bound, &mut buffer, 0)? {
            KeyWrite::Written(0) | KeyWrite::Unbounded => None,
            KeyWrite::Written(len) => {
                debug_assert_eq!(len, buffer.len());
                Some(buffer)
            }
        };

        match &key {
            Some(bytes) => record(MetricsEvent::KeyBuilt {
                bound,
                len: bytes.len() as u64,
            }),
            None => record(MetricsEvent::KeyUnbounded { bound }),
        }

        Ok(key)
    }

    /// Append the `bound` key for slots `start_slot..` onto `key`.
    ///
    /// Bytes already in `key` are the prefix built by earlier slots; a
    /// successor taken here carries into that prefix. On `Unbounded` the
    /// buffer is restored to its original length.
    pub fn set_key(
        &self,
        position: &[usize],
        bound: RangeBound,
        key: &mut Vec<u8>,
        start_slot: usize,
    ) -> Result<KeyWrite, InternalError> {
        self.check_position(position)?;
        if start_slot > self.slots.len() {
            return Err(SlotError::StartSlotOutOfRange {
                start: start_slot,
                slots: self.slots.len(),
            }
            .into());
        }

        let base = key.len();
        let mut increment_key = bound.is_upper();

        for index in start_slot..self.slots.len() {
            let range = &self.slots[index][position[index]];
            let is_fixed_width = self
                .schema
                .field(index)
                .is_some_and(|field| field.is_fixed_width());
            let separated = self.schema.writes_separator(index);

            // An open upper side filters nothing further, and neither does an
            // open lower side on a fixed-width field. An open lower side on a
            // variable-width field still writes its separator so the successor
            // below skips the empty (null) value. The final field has no
            // separator to step over, so it stops too.
            if range.is_unbound(bound) && (bound.is_upper() || is_fixed_width || !separated) {
                break;
            }

            increment_key = range.is_inclusive(bound) ^ bound.is_lower();

            key.extend_from_slice(range.range(bound));
            if separated {
                key.push(SEPARATOR_BYTE);
            }

            if !range.is_single_key() && increment_key {
                // A trailing variable-width value can grow, so the first key
                // past an excluded lower bound is the bound plus one zero byte.
                if bound.is_lower() && !is_fixed_width && !separated {
                    key.push(0x00);
                } else if !next_key(key) {
                    key.truncate(base);
                    record(MetricsEvent::SuccessorOverflow { bound });
                    return Ok(KeyWrite::Unbounded);
                }
                increment_key = false;

                // The successor replaced this field's separator, so later
                // fields no longer line up with stored keys.
                if separated {
                    break;
                }
            }
        }

        // A trailing single-key slot on the upper side still needs its
        // successor to become an exclusive stop key. An empty key stays
        // empty: that side is simply unbounded.
        if increment_key && !key.is_empty() && !next_key(key) {
            key.truncate(base);
            record(MetricsEvent::SuccessorOverflow { bound });
            return Ok(KeyWrite::Unbounded);
        }

        Ok(KeyWrite::Written(key.len() - base))
    }

    fn check_position(&self, position: &[usize]) -> Result<(), SlotError> {
        if position.len() != self.slots.len() {
            return Err(SlotError::PositionArity {
                positions: position.len(),
                slots: self.slots.len(),
            });
        }
        for (index, (slot, &at)) in self.slots.iter().zip(position).enumerate() {
            if at >= slot.len() {
                return Err(SlotError::PositionOutOfRange {
                    index,
                    position: at,
                    len: slot.len(),
                });
            }
        }

        Ok(())
    }
}

/// Minimum key for `slots` under `schema`; see [`CompositeKeyBuilder::min_key`].
pub fn min_key(
    schema: &RowKeySchema,
    slots: &[Vec<KeyRange>],
) -> Result<Option<Vec<u8>>, InternalError> {
    CompositeKeyBuilder::new(schema, slots)?.min_key()
}

/// Maximum key for `slots` under `schema`; see [`CompositeKeyBuilder::max_key`].
pub fn max_key(
    schema: &RowKeySchema,
    slots: &[Vec<KeyRange>],
) -> Result<Option<Vec<u8>>, InternalError> {
    CompositeKeyBuilder::new(schema, slots)?.max_key()
}
