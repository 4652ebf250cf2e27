use crate::{
    MIN_TABLE_TIMESTAMP, TENANT_ID_ATTRIB,
    config::ScanConfig,
    error::InternalError,
    filter::ScanFilter,
    scan::{ScanBounds, ScanRange, TimeRange},
};
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use std::collections::BTreeMap;

///
/// ScanRequest
///
/// Caller-owned range-scan request. Key bounds and filters only ever narrow
/// it; nothing here widens an existing range or drops a filter.
///
/// One request belongs to one in-flight query; concurrent callers must
/// serialize access themselves.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScanRequest {
    range: ScanRange,
    time_range: TimeRange,
    filter: Option<ScanFilter>,
    attributes: BTreeMap<String, ByteBuf>,
}

impl ScanRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request already restricted to `[start, stop)`.
    #[must_use]
    pub fn with_range(start: impl Into<Vec<u8>>, stop: impl Into<Vec<u8>>) -> Self {
        Self {
            range: ScanRange::new(start, stop),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn range(&self) -> &ScanRange {
        &self.range
    }

    #[must_use]
    pub fn start_row(&self) -> &[u8] {
        &self.range.start
    }

    #[must_use]
    pub fn stop_row(&self) -> &[u8] {
        &self.range.stop
    }

    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        self.time_range
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&ScanFilter> {
        self.filter.as_ref()
    }

    /// Narrow the request's row range by `[start, stop)`.
    ///
    /// Returns `false` when the narrowed range provably holds no rows; the
    /// caller should skip the scan entirely.
    pub fn intersect_scan_range(&mut self, start: &[u8], stop: &[u8]) -> bool {
        let (range, may_have_rows) = self.range.intersect(start, stop);
        self.range = range;

        may_have_rows
    }

    /// AND `filter` into the request's filter chain.
    pub fn and_filter(&mut self, filter: ScanFilter) {
        self.filter = Some(ScanFilter::and(self.filter.take(), filter));
    }

    /// Install computed bounds: narrow the range, then conjoin the residual
    /// filter if there is one. Returns `false` when the scan can be skipped.
    pub fn apply(&mut self, bounds: ScanBounds) -> bool {
        let ScanBounds {
            start,
            stop,
            filter,
        } = bounds;

        let may_have_rows = self.intersect_scan_range(
            start.as_deref().unwrap_or_default(),
            stop.as_deref().unwrap_or_default(),
        );
        if let Some(filter) = filter {
            self.and_filter(filter);
        }

        may_have_rows
    }

    /// Restrict the scan to cells written before `ts`.
    pub fn set_time_range(&mut self, ts: u64) -> Result<(), InternalError> {
        self.time_range = TimeRange::new(MIN_TABLE_TIMESTAMP, ts)?;

        Ok(())
    }

    /// Restrict the scan to cells in `[config.min_timestamp, ts)`.
    pub fn set_time_range_with(
        &mut self,
        config: &ScanConfig,
        ts: u64,
    ) -> Result<(), InternalError> {
        self.time_range = TimeRange::new(config.min_timestamp, ts)?;

        Ok(())
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&[u8]> {
        self.attributes.get(name).map(|value| value.as_slice())
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.attributes.insert(name.into(), ByteBuf::from(value.into()));
    }

    /// Attach the opaque tenant identifier used for row-key prefixing.
    pub fn set_tenant_id(&mut self, tenant_id: impl Into<Vec<u8>>) {
        self.set_attribute(TENANT_ID_ATTRIB, tenant_id);
    }

    #[must_use]
    pub fn tenant_id(&self) -> Option<&[u8]> {
        self.attribute(TENANT_ID_ATTRIB)
    }
}
