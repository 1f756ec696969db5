// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for lenient configuration parsing.
//!
//! Template authors hand over whatever JSON they like. Parsing must never
//! panic, and any object that parses must yield a configuration the planner
//! can run with (no overflow computing the fetch size).

#![no_main]

use chunkweave::{fetch_size, InjectConfig, QueryArgs};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let Some(map) = value.as_object() else {
        return;
    };

    let config = InjectConfig::from_args(map);
    let _ = fetch_size(&config, Some(usize::MAX));
    let _ = fetch_size(&config, Some(10));

    let query = QueryArgs::merged(map, 1, &["sponsor".to_string()]);
    assert!(query.page >= 1);
    assert_eq!(query.post_types, vec!["sponsor".to_string()]);

    // both counts present: the serde path coerces the same way
    if map.contains_key("beforeEachInject") && map.contains_key("perInject") {
        if let Ok(parsed) = serde_json::from_value::<InjectConfig>(value.clone()) {
            assert_eq!(parsed, config);
        }
    }
});
