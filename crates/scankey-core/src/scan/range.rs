use crate::{
    obs::sink::{MetricsEvent, record},
    scan::ScanError,
};
use serde::{Deserialize, Serialize};

///
/// ScanRange
///
/// Half-open `[start, stop)` row-key range of one scan.
/// An empty start means no lower bound; an empty stop means no upper bound.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ScanRange {
    #[serde(with = "serde_bytes")]
    pub start: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub stop: Vec<u8>,
}

impl ScanRange {
    #[must_use]
    pub fn new(start: impl Into<Vec<u8>>, stop: impl Into<Vec<u8>>) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
        }
    }

    /// Range with neither bound set.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: Vec::new(),
            stop: Vec::new(),
        }
    }

    /// Narrow this range by `[start, stop)`, keeping the tighter bound on
    /// each side.
    ///
    /// Returns the narrowed range and whether it can still hold rows. The
    /// answer is `true` whenever either side of `self` was unbounded;
    /// otherwise the narrowed start must sort before the narrowed stop.
    #[must_use]
    pub fn intersect(&self, start: &[u8], stop: &[u8]) -> (Self, bool) {
        let mut may_have_rows = false;

        let start = if self.start.is_empty() {
            may_have_rows = true;
            start
        } else if start.is_empty() || self.start.as_slice() > start {
            self.start.as_slice()
        } else {
            start
        };

        let stop = if self.stop.is_empty() {
            may_have_rows = true;
            stop
        } else if stop.is_empty() || self.stop.as_slice() < stop {
            self.stop.as_slice()
        } else {
            stop
        };

        let may_have_rows = may_have_rows || start < stop;
        record(MetricsEvent::ScanIntersected { may_have_rows });

        (Self::new(start, stop), may_have_rows)
    }

    /// Whether both sides are bounded and the range holds no key.
    #[must_use]
    pub fn is_provably_empty(&self) -> bool {
        !self.start.is_empty() && !self.stop.is_empty() && self.start >= self.stop
    }
}

///
/// TimeRange
///
/// Half-open `[min, max)` cell timestamp range of one scan.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "TimeRangeParts")]
pub struct TimeRange {
    min: u64,
    max: u64,
}

impl TimeRange {
    pub const fn new(min: u64, max: u64) -> Result<Self, ScanError> {
        if min > max {
            return Err(ScanError::InvalidTimeRange { min, max });
        }

        Ok(Self { min, max })
    }

    /// Every timestamp.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            min: 0,
            max: u64::MAX,
        }
    }

    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    #[must_use]
    pub const fn contains(&self, ts: u64) -> bool {
        ts >= self.min && ts < self.max
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Deserialize)]
struct TimeRangeParts {
    min: u64,
    max: u64,
}

impl TryFrom<TimeRangeParts> for TimeRange {
    type Error = ScanError;

    fn try_from(parts: TimeRangeParts) -> Result<Self, Self::Error> {
        Self::new(parts.min, parts.max)
    }
}
