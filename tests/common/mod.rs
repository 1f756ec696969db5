//! Shared test utilities and fixtures.

#![allow(dead_code)]

use chunkweave::{no_hooks, InjectConfig, InjectionLedger, Interleaver, MergeResult, Post};
use std::fs;
use std::path::PathBuf;

// Re-export canonical test utilities from chunkweave::testing
pub use chunkweave::testing::{
    ids, make_post, make_posts, make_sponsor, make_sponsors, RecordingHooks,
};

// ============================================================================
// MERGE HELPERS
// ============================================================================

/// Merge `secondary` into `primary` with a fresh interleaver and ledger.
pub fn merge_u64(
    primary: Vec<u64>,
    secondary: Vec<u64>,
    before_each: usize,
    per_inject: usize,
) -> (MergeResult<u64>, InjectionLedger<u64>) {
    let mut interleaver = Interleaver::new(no_hooks());
    interleaver.set_configuration(InjectConfig::new(before_each, per_inject));
    interleaver.set_secondary_items(secondary);

    let mut ledger = InjectionLedger::new();
    let result = interleaver.inject(primary, &mut ledger);
    (result, ledger)
}

/// Same as `merge_u64`, over posts.
pub fn merge_posts(
    primary: Vec<Post>,
    secondary: Vec<Post>,
    before_each: usize,
    per_inject: usize,
) -> (MergeResult<Post>, InjectionLedger<u64>) {
    let mut interleaver = Interleaver::new(no_hooks());
    interleaver.set_configuration(InjectConfig::new(before_each, per_inject));
    interleaver.set_secondary_items(secondary);

    let mut ledger = InjectionLedger::new();
    let result = interleaver.inject(primary, &mut ledger);
    (result, ledger)
}

// ============================================================================
// FILE FIXTURES
// ============================================================================

/// A store with `posts` primary posts (ids 1..) and `sponsors` sponsored
/// posts (ids 100..), as a JSON array.
pub fn store_json(posts: u64, sponsors: u64) -> String {
    let mut all = make_posts(posts);
    all.extend(make_sponsors(100, sponsors));
    serde_json::to_string(&all).expect("Failed to encode store")
}

/// Write `contents` to `name` inside a fresh temp directory.
///
/// The directory is returned so it outlives the test body.
pub fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    (dir, path)
}
