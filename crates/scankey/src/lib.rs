//! ## Crate layout
//! - `core`: row-key schemas, key ranges, bound building, scan requests,
//!   residual filters, and observability.
//!
//! The `prelude` module mirrors the surface scan planners use day to day.

pub use scankey_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{
    MIN_TABLE_TIMESTAMP, SEPARATOR_BYTE, TENANT_ID_ATTRIB, error::InternalError as Error,
};

///
/// Planner Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::ScanConfig,
        key::{max_key, min_key},
        obs::{metrics_report, metrics_reset_all},
        prelude::*,
    };
}
