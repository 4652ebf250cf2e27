use crate::{
    obs::{
        metrics::FilterShape,
        sink::{
            MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, record,
            with_metrics_sink,
        },
    },
    range::RangeBound,
};
use std::cell::RefCell;

#[derive(Default)]
struct CaptureSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn global_sink_accumulates_per_side_counters() {
    metrics_reset_all();

    record(MetricsEvent::KeyBuilt {
        bound: RangeBound::Lower,
        len: 3,
    });
    record(MetricsEvent::KeyBuilt {
        bound: RangeBound::Upper,
        len: 4,
    });
    record(MetricsEvent::KeyUnbounded {
        bound: RangeBound::Upper,
    });
    record(MetricsEvent::SuccessorOverflow {
        bound: RangeBound::Lower,
    });

    let report = metrics_report();
    assert_eq!(report.keys.lower_built, 1);
    assert_eq!(report.keys.upper_built, 1);
    assert_eq!(report.keys.bytes_built, 7);
    assert_eq!(report.keys.lower_unbounded, 0);
    assert_eq!(report.keys.upper_unbounded, 1);
    assert_eq!(report.keys.successor_overflows, 1);
}

#[test]
fn pruned_scans_count_only_empty_intersections() {
    metrics_reset_all();

    record(MetricsEvent::ScanIntersected {
        may_have_rows: true,
    });
    record(MetricsEvent::ScanIntersected {
        may_have_rows: false,
    });
    record(MetricsEvent::FilterConjoined {
        shape: FilterShape::Wrapped,
    });

    let report = metrics_report();
    assert_eq!(report.scans.intersected, 2);
    assert_eq!(report.scans.pruned, 1);
    assert_eq!(report.scans.filters_wrapped, 1);
    assert_eq!(report.scans.filters_installed, 0);
}

#[test]
fn scoped_sink_captures_events_and_bypasses_global_state() {
    metrics_reset_all();
    let sink = CaptureSink::default();

    with_metrics_sink(&sink, || {
        record(MetricsEvent::KeyUnbounded {
            bound: RangeBound::Lower,
        });
    });

    assert_eq!(
        sink.events.borrow().as_slice(),
        &[MetricsEvent::KeyUnbounded {
            bound: RangeBound::Lower,
        }]
    );
    assert_eq!(metrics_report().keys.lower_unbounded, 0);

    // override is gone once the scope exits
    record(MetricsEvent::KeyUnbounded {
        bound: RangeBound::Lower,
    });
    assert_eq!(metrics_report().keys.lower_unbounded, 1);
}
