//! Lenient configuration parsing.

use chunkweave::{coerce_count, InjectConfig, QueryArgs};
use serde_json::json;

#[test]
fn test_coerce_count_table() {
    let cases = [
        (json!(3), 3),
        (json!(0), 0),
        (json!(-4), 0),
        (json!(2.9), 2),
        (json!(-0.5), 0),
        (json!(" 5 "), 5),
        (json!("-2"), 0),
        (json!("abc"), 0),
        (json!(true), 1),
        (json!(null), 0),
        (json!([1]), 0),
    ];
    for (raw, expected) in cases {
        assert_eq!(coerce_count(&raw), expected, "input {}", raw);
    }
}

#[test]
fn test_config_deserializes_from_loose_json() {
    let config: InjectConfig =
        serde_json::from_value(json!({"beforeEachInject": "4", "perInject": -1})).unwrap();
    assert_eq!(config, InjectConfig::new(4, 0));
    assert!(config.is_degenerate());

    let config: InjectConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(config, InjectConfig::default());
    assert!(!config.is_degenerate());
}

#[test]
fn test_snake_case_args_are_accepted() {
    let map = json!({"before_each_inject": 5, "per_inject": 2});
    let config = InjectConfig::from_args(map.as_object().unwrap());
    assert_eq!(config, InjectConfig::new(5, 2));
}

#[test]
fn test_query_args_accept_single_post_type() {
    let args: QueryArgs =
        serde_json::from_value(json!({"postType": "sponsor", "orderby": "rand"})).unwrap();
    assert_eq!(args.post_types, vec!["sponsor".to_string()]);
    assert_eq!(args.page, 1);
    assert_eq!(args.filter_str("orderby"), Some("rand"));
}

#[test]
fn test_merged_query_args_force_post_types() {
    let caller = json!({"postType": "page", "posts_per_page": 50, "orderby": "date"});
    let args = QueryArgs::merged(
        caller.as_object().unwrap(),
        3,
        &["sponsor".to_string()],
    );
    assert_eq!(args.post_types, vec!["sponsor".to_string()]);
    assert_eq!(args.posts_per_page, None);
    assert_eq!(args.page, 3);
    assert_eq!(args.filter_str("orderby"), Some("date"));
    assert!(!args.filters.contains_key("postType"));
}
