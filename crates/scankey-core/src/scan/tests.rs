use crate::{
    MIN_TABLE_TIMESTAMP, TENANT_ID_ATTRIB,
    config::ScanConfig,
    error::{ErrorClass, ErrorOrigin},
    filter::{PredicateFilter, ScanFilter},
    range::KeyRange,
    scan::{ScanBounds, ScanRange, ScanRequest, TimeRange},
    schema::RowKeySchema,
};

fn leaf(name: &str) -> ScanFilter {
    PredicateFilter::new(name, Vec::new()).into()
}

#[test]
fn disjoint_ranges_intersect_to_a_skippable_scan() {
    let mut scan = ScanRequest::with_range(vec![0x10], vec![0x20]);

    assert!(!scan.intersect_scan_range(&[0x25], &[0x30]));
    assert_eq!(scan.start_row(), &[0x25]);
    assert_eq!(scan.stop_row(), &[0x20]);
    assert!(scan.range().is_provably_empty());
}

#[test]
fn intersection_keeps_the_tighter_bound_per_side() {
    let mut scan = ScanRequest::with_range(vec![0x10], vec![0x40]);

    assert!(scan.intersect_scan_range(&[0x08], &[0x30]));
    assert_eq!(scan.start_row(), &[0x10]);
    assert_eq!(scan.stop_row(), &[0x30]);

    assert!(scan.intersect_scan_range(&[0x18], &[0x50]));
    assert_eq!(scan.start_row(), &[0x18]);
    assert_eq!(scan.stop_row(), &[0x30]);
}

#[test]
fn empty_new_bounds_never_widen_the_scan() {
    let mut scan = ScanRequest::with_range(vec![0x10], vec![0x20]);

    assert!(scan.intersect_scan_range(&[], &[]));
    assert_eq!(scan.range(), &ScanRange::new(vec![0x10], vec![0x20]));
}

#[test]
fn unbounded_existing_side_always_may_have_rows() {
    let mut scan = ScanRequest::with_range(Vec::new(), vec![0x20]);

    // The existing start was open, so the range is reported as non-empty.
    assert!(scan.intersect_scan_range(&[0x30], &[]));
    assert_eq!(scan.start_row(), &[0x30]);
    assert_eq!(scan.stop_row(), &[0x20]);
}

#[test]
fn touching_bounds_are_empty() {
    let (range, may_have_rows) = ScanRange::new(vec![0x10], vec![0x20]).intersect(&[0x20], &[]);

    assert!(!may_have_rows);
    assert_eq!(range, ScanRange::new(vec![0x20], vec![0x20]));
}

#[test]
fn point_range_scan_stops_at_the_successor() {
    let schema = RowKeySchema::builder()
        .fixed(1)
        .build()
        .expect("schema should build");
    let slots = vec![vec![KeyRange::point(vec![5])]];

    let bounds = ScanBounds::compute(&schema, &slots, None).expect("bounds should compute");
    assert_eq!(bounds.start.as_deref(), Some(&[5][..]));
    assert_eq!(bounds.stop.as_deref(), Some(&[6][..]));
    assert!(!bounds.is_provably_empty());

    let mut scan = ScanRequest::new();
    assert!(scan.apply(bounds));
    assert_eq!(scan.start_row(), &[5]);
    assert_eq!(scan.stop_row(), &[6]);
    assert!(scan.filter().is_none());
}

#[test]
fn applying_bounds_conjoins_residual_filters_flat() {
    let schema = RowKeySchema::builder()
        .fixed(1)
        .build()
        .expect("schema should build");
    let slots = vec![vec![KeyRange::at_least(vec![3])]];
    let mut scan = ScanRequest::new();

    for name in ["f1", "f2"] {
        let bounds = ScanBounds::compute(&schema, &slots, Some(leaf(name)))
            .expect("bounds should compute");
        assert_eq!(bounds.stop, None);
        assert!(scan.apply(bounds));
    }
    scan.and_filter(leaf("f3"));

    assert_eq!(scan.start_row(), &[3]);
    assert!(scan.stop_row().is_empty());
    assert_eq!(
        scan.filter(),
        Some(&ScanFilter::All(vec![leaf("f3"), leaf("f2"), leaf("f1")]))
    );
}

#[test]
fn debug_config_computes_identical_bounds() {
    let schema = RowKeySchema::builder()
        .variable()
        .build()
        .expect("schema should build");
    let slots = vec![vec![KeyRange::point(b"abc".to_vec())]];

    let quiet = ScanBounds::compute(&schema, &slots, None).expect("bounds should compute");
    let traced =
        ScanBounds::compute_with(&ScanConfig::default().debug(true), &schema, &slots, None)
            .expect("bounds should compute");

    assert_eq!(quiet, traced);
    assert_eq!(traced.stop.as_deref(), Some(&b"abd"[..]));
}

#[test]
fn tenant_id_is_an_opaque_attribute() {
    let mut scan = ScanRequest::new();
    assert_eq!(scan.tenant_id(), None);

    scan.set_tenant_id(b"acme".to_vec());

    assert_eq!(scan.tenant_id(), Some(&b"acme"[..]));
    assert_eq!(scan.attribute(TENANT_ID_ATTRIB), Some(&b"acme"[..]));
    assert_eq!(scan.attribute("other"), None);
}

#[test]
fn time_range_starts_at_the_table_minimum() {
    let mut scan = ScanRequest::new();
    assert_eq!(scan.time_range(), TimeRange::all());

    scan.set_time_range(1_000).expect("time range should set");

    assert_eq!(scan.time_range().min(), MIN_TABLE_TIMESTAMP);
    assert_eq!(scan.time_range().max(), 1_000);
    assert!(scan.time_range().contains(999));
    assert!(!scan.time_range().contains(1_000));
}

#[test]
fn time_range_before_configured_minimum_is_rejected() {
    let config = ScanConfig {
        min_timestamp: 50,
        ..ScanConfig::default()
    };
    let mut scan = ScanRequest::new();

    let err = scan
        .set_time_range_with(&config, 10)
        .expect_err("inverted time range should fail");

    assert_eq!(err.class, ErrorClass::InvalidInput);
    assert_eq!(err.origin, ErrorOrigin::Scan);
    assert_eq!(scan.time_range(), TimeRange::all());
}

#[test]
fn request_round_trips_through_json() {
    let mut scan = ScanRequest::with_range(vec![1], vec![9]);
    scan.set_tenant_id(b"t1".to_vec());
    scan.and_filter(leaf("f"));
    scan.set_time_range(77).expect("time range should set");

    let json = serde_json::to_string(&scan).expect("request should serialize");
    let decoded: ScanRequest = serde_json::from_str(&json).expect("request should deserialize");

    assert_eq!(decoded, scan);
}
