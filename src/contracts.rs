//! Runtime contracts for the interleave merge.
//!
//! Debug-mode assertions that check the merge against its closed-form
//! properties. These contracts:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fail **at the merge that broke**, not three templates later
//! 3. Mirror the properties the property tests check on random inputs
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function         | Property                                               |
//! |---------------------------|--------------------------------------------------------|
//! | `check_merged_len`        | `len(M) = len(P) + min(len(S), p·⌈len(P)/b⌉)`           |
//! | `check_primary_order`     | dropping injected items from M yields P, in order      |
//! | `check_injected_prefix`   | injected items of M, in order, are a prefix of S       |
//! | `check_fetch_size`        | `fetch = ⌊p·size/b⌋`, never more than `p·size`          |
//!
//! # Usage
//!
//! ```ignore
//! use chunkweave::contracts::*;
//!
//! // In debug builds, this panics if the invariant is violated
//! check_primary_order(&primary_ids, &merged_ids, &origins);
//!
//! // In release builds, this is a no-op
//! ```

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

// The defaults must describe a working injection, not the degenerate one.
const _: () = {
    assert!(crate::config::DEFAULT_BEFORE_EACH_INJECT > 0);
    assert!(crate::config::DEFAULT_PER_INJECT > 0);
};

use crate::config::InjectConfig;
use crate::interleave::{merged_len, Origin};

// ============================================================================
// MERGE CONTRACTS
// ============================================================================

/// Check the merged length against the closed form.
///
/// # Panics (debug builds only)
/// Panics if `merged_len` differs from
/// `primary_len + min(secondary_len, per_inject * ceil(primary_len / before_each_inject))`.
#[inline]
pub fn check_merged_len(
    primary_len: usize,
    secondary_len: usize,
    config: &InjectConfig,
    actual: usize,
) {
    let expected = merged_len(
        primary_len,
        secondary_len,
        config.before_each_inject,
        config.per_inject,
    );
    debug_assert_eq!(
        actual, expected,
        "Contract violation: MergedLength - merged {} items, expected {} \
         (primary={}, secondary={}, b={}, p={})",
        actual, expected, primary_len, secondary_len, config.before_each_inject, config.per_inject
    );
    debug_assert!(
        actual <= primary_len + secondary_len,
        "Contract violation: MergedLength - merged {} > primary {} + secondary {}",
        actual,
        primary_len,
        secondary_len
    );
}

/// Check that primary items survive the merge in their original order.
///
/// # Panics (debug builds only)
/// Panics if the primary-origin items of `merged` differ from `primary`.
#[inline]
pub fn check_primary_order<K: PartialEq + std::fmt::Debug>(
    primary: &[K],
    merged: &[K],
    origins: &[Origin],
) {
    debug_assert_eq!(
        merged.len(),
        origins.len(),
        "Contract violation: PrimaryOrder - {} items but {} origins",
        merged.len(),
        origins.len()
    );

    let kept: Vec<&K> = merged
        .iter()
        .zip(origins)
        .filter(|(_, origin)| **origin == Origin::Primary)
        .map(|(key, _)| key)
        .collect();

    debug_assert_eq!(
        kept.len(),
        primary.len(),
        "Contract violation: PrimaryOrder - {} primary items in output, {} in input",
        kept.len(),
        primary.len()
    );

    for (i, (got, want)) in kept.iter().zip(primary).enumerate() {
        debug_assert!(
            *got == want,
            "Contract violation: PrimaryOrder - primary item {} is {:?}, expected {:?}",
            i,
            got,
            want
        );
    }
}

/// Check that injected items are the leading items of the secondary list.
///
/// # Panics (debug builds only)
/// Panics if the secondary-origin items of `merged` are not `secondary[..k]`.
#[inline]
pub fn check_injected_prefix<K: PartialEq + std::fmt::Debug>(
    secondary: &[K],
    merged: &[K],
    origins: &[Origin],
) {
    let injected: Vec<&K> = merged
        .iter()
        .zip(origins)
        .filter(|(_, origin)| **origin == Origin::Secondary)
        .map(|(key, _)| key)
        .collect();

    debug_assert!(
        injected.len() <= secondary.len(),
        "Contract violation: InjectedPrefix - {} injected from {} secondary items",
        injected.len(),
        secondary.len()
    );

    for (i, (got, want)) in injected.iter().zip(secondary).enumerate() {
        debug_assert!(
            *got == want,
            "Contract violation: InjectedPrefix - injected item {} is {:?}, expected {:?}",
            i,
            got,
            want
        );
    }
}

// ============================================================================
// PLANNER CONTRACTS
// ============================================================================

/// Check a computed fetch size.
///
/// # Panics (debug builds only)
/// Panics if `fetch * b > p * size` or `(fetch + 1) * b <= p * size`
/// (i.e. `fetch` is not the floor), unless the product saturated.
#[inline]
pub fn check_fetch_size(config: &InjectConfig, page_size: usize, fetch: usize) {
    let b = config.before_each_inject as u128;
    let p = config.per_inject as u128;
    if b == 0 {
        debug_assert_eq!(fetch, 0, "Contract violation: FetchSize - b = 0 but fetch {}", fetch);
        return;
    }
    if fetch == usize::MAX {
        return;
    }
    let wanted = p * page_size as u128;
    let f = fetch as u128;
    debug_assert!(
        f * b <= wanted && (f + 1) * b > wanted,
        "Contract violation: FetchSize - fetch {} is not floor({} * {} / {})",
        fetch,
        p,
        page_size,
        b
    );
}
