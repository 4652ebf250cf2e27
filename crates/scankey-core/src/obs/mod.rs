//! Observability: runtime counters and the sink abstraction feeding them.
//!
//! Key building and scan narrowing never touch counters directly; every
//! event flows through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventReport, FilterShape, KeyCounters, ScanCounters};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
