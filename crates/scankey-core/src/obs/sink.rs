//! Metrics sink boundary.
//!
//! Key building and scan code MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between key/scan logic
//! and the thread-local metrics state.
use crate::{
    obs::metrics::{self, FilterShape},
    range::RangeBound,
};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    KeyBuilt { bound: RangeBound, len: u64 },
    KeyUnbounded { bound: RangeBound },
    SuccessorOverflow { bound: RangeBound },
    ScanIntersected { may_have_rows: bool },
    FilterConjoined { shape: FilterShape },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::KeyBuilt { bound, len } => {
                metrics::with_state_mut(|m| {
                    let keys = &mut m.keys;
                    metrics::bump_side(&mut keys.lower_built, &mut keys.upper_built, bound);
                    keys.bytes_built = keys.bytes_built.saturating_add(len);
                });
            }

            MetricsEvent::KeyUnbounded { bound } => {
                metrics::with_state_mut(|m| {
                    let keys = &mut m.keys;
                    metrics::bump_side(&mut keys.lower_unbounded, &mut keys.upper_unbounded, bound);
                });
            }

            MetricsEvent::SuccessorOverflow { .. } => {
                metrics::with_state_mut(|m| {
                    m.keys.successor_overflows = m.keys.successor_overflows.saturating_add(1);
                });
            }

            MetricsEvent::ScanIntersected { may_have_rows } => {
                metrics::with_state_mut(|m| {
                    m.scans.intersected = m.scans.intersected.saturating_add(1);
                    if !may_have_rows {
                        m.scans.pruned = m.scans.pruned.saturating_add(1);
                    }
                });
            }

            MetricsEvent::FilterConjoined { shape } => {
                metrics::with_state_mut(|m| match shape {
                    FilterShape::Installed => {
                        m.scans.filters_installed = m.scans.filters_installed.saturating_add(1);
                    }
                    FilterShape::Flattened => {
                        m.scans.filters_flattened = m.scans.filters_flattened.saturating_add(1);
                    }
                    FilterShape::Wrapped => {
                        m.scans.filters_wrapped = m.scans.filters_wrapped.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // Preconditions:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    //
    // What would break this:
    // - Any deferred use of `sink_ptr` beyond this scope.
    // - Any path that bypasses Guard restoration.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
