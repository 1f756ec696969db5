//! Fetch planner against the in-memory store.

use super::common::{ids, make_posts, make_sponsors};
use chunkweave::{
    fetch_size, no_hooks, FetchPlanner, InjectConfig, InjectionLedger, MemorySource, PageContext,
    PlannerState, Post,
};
use serde_json::{json, Map, Value};

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn planner(sponsors: u64) -> FetchPlanner<Post, MemorySource> {
    let store = MemorySource::new(make_sponsors(100, sponsors));
    FetchPlanner::new(vec!["sponsor".to_string()], store, no_hooks())
}

#[test]
fn test_fetch_size_table() {
    let cases = [
        // (b, p, page size, expected)
        (3, 1, 9, 3),
        (3, 1, 10, 3),
        (4, 3, 10, 7),
        (1, 2, 5, 10),
        (10, 1, 3, 0),
        (0, 5, 10, 0),
        (2, 0, 10, 0),
    ];
    for (b, p, size, expected) in cases {
        assert_eq!(
            fetch_size(&InjectConfig::new(b, p), Some(size)),
            Some(expected),
            "b={} p={} size={}",
            b,
            p,
            size
        );
    }
}

#[test]
fn test_full_page_gets_full_sponsor_set() {
    let mut planner = planner(10);
    planner.configure(&args(json!({"beforeEachInject": 3, "perInject": 1})));
    planner.set_query_args(&Map::new(), None);

    let mut ledger = InjectionLedger::new();
    let out = planner.run(make_posts(9), &PageContext::new(9), &mut ledger);

    assert_eq!(ids(&out), vec![1, 2, 3, 100, 4, 5, 6, 101, 7, 8, 9, 102]);
    assert_eq!(planner.state(), PlannerState::Fired);
}

#[test]
fn test_page_number_selects_sponsor_page() {
    let mut planner = planner(10);
    planner.configure(&args(json!({"beforeEachInject": 2})));
    planner.set_query_args(&Map::new(), Some(3));

    let mut ledger = InjectionLedger::new();
    let out = planner.run(make_posts(4), &PageContext::new(4).on_page(3), &mut ledger);

    // two per page, page 3 starts at the fifth sponsor
    assert_eq!(ids(&out), vec![1, 2, 104, 3, 4, 105]);
}

#[test]
fn test_caller_page_overrides_current_page() {
    let mut planner = planner(10);
    planner.set_query_args(&args(json!({"paged": 2})), Some(5));
    assert_eq!(planner.query_args().page, 2);
}

#[test]
fn test_unlimited_listing_fetches_everything() {
    let mut planner = planner(3);
    let mut ledger = InjectionLedger::new();
    let out = planner.run(make_posts(5), &PageContext::unlimited(), &mut ledger);

    assert_eq!(ids(&out), vec![1, 100, 2, 101, 3, 102, 4, 5]);
    assert_eq!(planner.query_args().posts_per_page, None);
}

#[test]
fn test_string_counts_are_coerced() {
    let mut planner = planner(4);
    planner.configure(&args(json!({"beforeEachInject": "2", "perInject": "2"})));
    assert_eq!(*planner.config(), InjectConfig::new(2, 2));

    let mut ledger = InjectionLedger::new();
    let out = planner.run(make_posts(2), &PageContext::new(2), &mut ledger);
    assert_eq!(ids(&out), vec![1, 2, 100, 101]);
}

#[test]
fn test_meta_filters_reach_the_store() {
    let mut store = make_sponsors(100, 3);
    store[1] = store[1].clone().with_meta("placement", "home");
    let mut planner: FetchPlanner<Post, MemorySource> = FetchPlanner::new(
        vec!["sponsor".to_string()],
        MemorySource::new(store),
        no_hooks(),
    );
    planner.set_query_args(
        &args(json!({"metaKey": "placement", "metaValue": "home"})),
        None,
    );

    let mut ledger = InjectionLedger::new();
    let out = planner.run(make_posts(2), &PageContext::new(2), &mut ledger);
    assert_eq!(ids(&out), vec![1, 101, 2]);
}
