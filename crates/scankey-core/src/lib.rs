//! Core runtime for scankey: composite row-key bound encoding, scan-range
//! narrowing, and residual filter conjunction for range scans over a sorted
//! key-value store.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod filter;
pub mod key;
pub mod obs;
pub mod range;
pub mod scan;
pub mod schema;

///
/// CONSTANTS
///

/// Reserved byte terminating a variable-width field inside a packed row key.
///
/// The value encoding layer guarantees no variable-width field payload ever
/// contains this byte.
pub const SEPARATOR_BYTE: u8 = 0x00;

/// Lowest timestamp a table row can carry; scan time ranges start here.
pub const MIN_TABLE_TIMESTAMP: u64 = 0;

/// Scan attribute name carrying the opaque tenant identifier.
pub const TENANT_ID_ATTRIB: &str = "TenantId";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{PredicateFilter, ScanFilter},
        key::{CompositeKeyBuilder, KeyWrite},
        range::{KeyRange, RangeBound},
        scan::{ScanBounds, ScanRange, ScanRequest, TimeRange},
        schema::{FieldDescriptor, RowKeySchema},
    };
}
