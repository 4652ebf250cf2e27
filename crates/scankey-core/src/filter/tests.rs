use crate::filter::{PredicateFilter, ScanFilter};

fn leaf(name: &str) -> ScanFilter {
    PredicateFilter::new(name, name.as_bytes().to_vec()).into()
}

#[test]
fn first_filter_is_installed_as_is() {
    let chain = ScanFilter::and(None, leaf("f1"));

    assert_eq!(chain, leaf("f1"));
    assert_eq!(chain.depth(), 0);
}

#[test]
fn repeated_conjunction_stays_flat_most_recent_first() {
    let mut chain = None;
    for name in ["f1", "f2", "f3"] {
        chain = Some(ScanFilter::and(chain, leaf(name)));
    }

    let chain = chain.expect("chain should be set");
    assert_eq!(
        chain,
        ScanFilter::All(vec![leaf("f3"), leaf("f2"), leaf("f1")])
    );
    assert_eq!(chain.depth(), 1);
}

#[test]
fn any_group_is_wrapped_not_flattened() {
    let any = ScanFilter::Any(vec![leaf("a"), leaf("b")]);
    let chain = ScanFilter::and(Some(any.clone()), leaf("c"));

    assert_eq!(chain, ScanFilter::All(vec![leaf("c"), any]));
    assert_eq!(chain.depth(), 2);
}

#[test]
fn filter_tree_round_trips_through_json() {
    let chain = ScanFilter::All(vec![leaf("a"), ScanFilter::Any(vec![leaf("b")])]);

    let json = serde_json::to_string(&chain).expect("filter should serialize");
    let decoded: ScanFilter = serde_json::from_str(&json).expect("filter should deserialize");

    assert_eq!(decoded, chain);
}
