use crate::{
    config::ScanConfig,
    error::InternalError,
    filter::ScanFilter,
    key::CompositeKeyBuilder,
    range::KeyRange,
    schema::RowKeySchema,
};

///
/// ScanBounds
///
/// Start key, stop key, and residual filter computed for one query.
/// `None` keys leave that side of the scan unbounded. Computing bounds
/// never touches a `ScanRequest`; callers install them with
/// `ScanRequest::apply`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanBounds {
    pub start: Option<Vec<u8>>,
    pub stop: Option<Vec<u8>>,
    pub filter: Option<ScanFilter>,
}

impl ScanBounds {
    pub fn compute(
        schema: &RowKeySchema,
        slots: &[Vec<KeyRange>],
        filter: Option<ScanFilter>,
    ) -> Result<Self, InternalError> {
        Self::compute_with(&ScanConfig::default(), schema, slots, filter)
    }

    pub fn compute_with(
        config: &ScanConfig,
        schema: &RowKeySchema,
        slots: &[Vec<KeyRange>],
        filter: Option<ScanFilter>,
    ) -> Result<Self, InternalError> {
        let builder = CompositeKeyBuilder::new(schema, slots)?;
        let start = builder.min_key()?;
        let stop = builder.max_key()?;

        config.debug_log(format!(
            "scan bounds over {} of {} fields: start={:02x?} stop={:02x?} residual={}",
            builder.slot_count(),
            schema.max_fields(),
            start,
            stop,
            filter.is_some(),
        ));

        Ok(Self {
            start,
            stop,
            filter,
        })
    }

    /// Whether both keys are present and the start does not sort before the stop.
    #[must_use]
    pub fn is_provably_empty(&self) -> bool {
        matches!((&self.start, &self.stop), (Some(start), Some(stop)) if start >= stop)
    }
}
