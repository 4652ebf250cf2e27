//! Module: range
//! Responsibility: per-field byte interval value type consumed by key building.
//! Does not own: predicate compilation or candidate-range ordering.
//! Boundary: the compiler constructs `KeyRange`s; key building only reads them.


use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// KeyRangeError
///
/// Reason a `KeyRange` could not be constructed.
/// Inverted and empty intervals never reach key building.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum KeyRangeError {
    #[error("invalid key range: lower bound {lower:02x?} sorts after upper bound {upper:02x?}")]
    Inverted { lower: Vec<u8>, upper: Vec<u8> },

    #[error("invalid key range: bound {key:02x?} excluded from a single-key interval")]
    Degenerate { key: Vec<u8> },
}

///
/// RangeBound
///
/// Side of a range (and of the key being built from it).
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum RangeBound {
    Lower,
    Upper,
}

impl RangeBound {
    #[must_use]
    pub const fn is_lower(self) -> bool {
        matches!(self, Self::Lower)
    }

    #[must_use]
    pub const fn is_upper(self) -> bool {
        matches!(self, Self::Upper)
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        };
        write!(f, "{label}")
    }
}

///
/// KeyRange
///
/// Interval of encoded byte strings for one row-key field.
///
/// A missing bound is unbounded on that side and always reports
/// non-inclusive. An empty bound is treated the same as a missing one,
/// since the empty byte string already sorts before every key.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KeyRangeParts")]
pub struct KeyRange {
    #[serde(with = "serde_bytes")]
    lower: Option<Vec<u8>>,
    lower_inclusive: bool,
    #[serde(with = "serde_bytes")]
    upper: Option<Vec<u8>>,
    upper_inclusive: bool,
}

impl KeyRange {
    /// Build a range, rejecting inverted and empty intervals.
    pub fn new(
        lower: Option<Vec<u8>>,
        lower_inclusive: bool,
        upper: Option<Vec<u8>>,
        upper_inclusive: bool,
    ) -> Result<Self, KeyRangeError> {
        let lower = lower.filter(|bytes| !bytes.is_empty());
        let upper = upper.filter(|bytes| !bytes.is_empty());
        let lower_inclusive = lower_inclusive && lower.is_some();
        let upper_inclusive = upper_inclusive && upper.is_some();

        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            if lo > hi {
                return Err(KeyRangeError::Inverted {
                    lower: lo.clone(),
                    upper: hi.clone(),
                });
            }
            if lo == hi && !(lower_inclusive && upper_inclusive) {
                return Err(KeyRangeError::Degenerate { key: lo.clone() });
            }
        }

        Ok(Self {
            lower,
            lower_inclusive,
            upper,
            upper_inclusive,
        })
    }

    /// Range with no bound on either side.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            lower: None,
            lower_inclusive: false,
            upper: None,
            upper_inclusive: false,
        }
    }

    /// Single-key range `[key, key]`.
    #[must_use]
    pub fn point(key: impl Into<Vec<u8>>) -> Self {
        let key = key.into();
        if key.is_empty() {
            return Self::everything();
        }

        Self {
            lower: Some(key.clone()),
            lower_inclusive: true,
            upper: Some(key),
            upper_inclusive: true,
        }
    }

    /// `(key, +inf)`
    #[must_use]
    pub fn greater_than(key: impl Into<Vec<u8>>) -> Self {
        Self::lower_only(key.into(), false)
    }

    /// `[key, +inf)`
    #[must_use]
    pub fn at_least(key: impl Into<Vec<u8>>) -> Self {
        Self::lower_only(key.into(), true)
    }

    /// `(-inf, key)`
    #[must_use]
    pub fn less_than(key: impl Into<Vec<u8>>) -> Self {
        Self::upper_only(key.into(), false)
    }

    /// `(-inf, key]`
    #[must_use]
    pub fn at_most(key: impl Into<Vec<u8>>) -> Self {
        Self::upper_only(key.into(), true)
    }

    fn lower_only(key: Vec<u8>, inclusive: bool) -> Self {
        let lower = Some(key).filter(|bytes| !bytes.is_empty());

        Self {
            lower_inclusive: inclusive && lower.is_some(),
            lower,
            upper: None,
            upper_inclusive: false,
        }
    }

    fn upper_only(key: Vec<u8>, inclusive: bool) -> Self {
        let upper = Some(key).filter(|bytes| !bytes.is_empty());

        Self {
            lower: None,
            lower_inclusive: false,
            upper_inclusive: inclusive && upper.is_some(),
            upper,
        }
    }

    /// Bound bytes on one side; empty when that side is unbounded.
    #[must_use]
    pub fn range(&self, bound: RangeBound) -> &[u8] {
        self.bound_bytes(bound).unwrap_or_default()
    }

    #[must_use]
    pub fn bound_bytes(&self, bound: RangeBound) -> Option<&[u8]> {
        match bound {
            RangeBound::Lower => self.lower.as_deref(),
            RangeBound::Upper => self.upper.as_deref(),
        }
    }

    #[must_use]
    pub const fn is_unbound(&self, bound: RangeBound) -> bool {
        match bound {
            RangeBound::Lower => self.lower.is_none(),
            RangeBound::Upper => self.upper.is_none(),
        }
    }

    #[must_use]
    pub const fn is_inclusive(&self, bound: RangeBound) -> bool {
        match bound {
            RangeBound::Lower => self.lower_inclusive,
            RangeBound::Upper => self.upper_inclusive,
        }
    }

    /// Both bounds present, equal, and inclusive.
    #[must_use]
    pub fn is_single_key(&self) -> bool {
        self.lower_inclusive
            && self.upper_inclusive
            && self.lower.is_some()
            && self.lower == self.upper
    }

    /// Whether `key` falls inside this interval.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        let lower_ok = match &self.lower {
            None => true,
            Some(lower) if self.lower_inclusive => key >= lower.as_slice(),
            Some(lower) => key > lower.as_slice(),
        };
        let upper_ok = match &self.upper {
            None => true,
            Some(upper) if self.upper_inclusive => key <= upper.as_slice(),
            Some(upper) => key < upper.as_slice(),
        };

        lower_ok && upper_ok
    }
}

impl fmt::Display for KeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower_inclusive { '[' } else { '(' };
        let close = if self.upper_inclusive { ']' } else { ')' };
        match &self.lower {
            Some(lower) => write!(f, "{open}{lower:02x?}, ")?,
            None => write!(f, "{open}*, ")?,
        }
        match &self.upper {
            Some(upper) => write!(f, "{upper:02x?}{close}"),
            None => write!(f, "*{close}"),
        }
    }
}

///
/// KeyRangeParts
///
/// Unvalidated wire shape; deserialization goes through `KeyRange::new`.
///

#[derive(Deserialize)]
struct KeyRangeParts {
    #[serde(default, with = "serde_bytes")]
    lower: Option<Vec<u8>>,
    #[serde(default)]
    lower_inclusive: bool,
    #[serde(default, with = "serde_bytes")]
    upper: Option<Vec<u8>>,
    #[serde(default)]
    upper_inclusive: bool,
}

impl TryFrom<KeyRangeParts> for KeyRange {
    type Error = KeyRangeError;

    fn try_from(parts: KeyRangeParts) -> Result<Self, Self::Error> {
        Self::new(
            parts.lower,
            parts.lower_inclusive,
            parts.upper,
            parts.upper_inclusive,
        )
    }
}
