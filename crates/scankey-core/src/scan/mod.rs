//! Module: scan
//! Responsibility: narrowing a range-scan request with computed key bounds.
//! Does not own: scan execution or the decision to range-scan at all.
//! Boundary: callers install `ScanBounds` onto the `ScanRequest` they own.

mod bounds;
mod range;
mod request;

#[cfg(test)]
mod tests;

pub use bounds::ScanBounds;
pub use range::{ScanRange, TimeRange};
pub use request::ScanRequest;

use thiserror::Error as ThisError;

///
/// ScanError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ScanError {
    #[error("invalid time range: min {min} is after max {max}")]
    InvalidTimeRange { min: u64, max: u64 },
}
