//! Module: key
//! Responsibility: composite row-key bound construction and byte successors.
//! Does not own: scan-request mutation or residual filters.
//! Boundary: scan planning calls this module to turn slots into raw keys.

mod builder;
mod successor;


pub use builder::{CompositeKeyBuilder, KeyWrite, SlotError, max_key, min_key};
pub use successor::{next_key, successor};
