// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the chunk/zip/flatten merge.
//!
//! Arbitrary list lengths and counts, zeros included. The interleaver's
//! debug contracts run on every merge; this target adds the properties a
//! caller relies on: primary order survives, injected items are a prefix of
//! the secondary list, and the length matches the closed form.

#![no_main]

use chunkweave::{merged_len, no_hooks, InjectConfig, InjectionLedger, Interleaver};
use libfuzzer_sys::fuzz_target;

/// Secondary ids start here so they never collide with primary ids.
const SECONDARY_BASE: u64 = 1 << 32;

#[derive(Debug, arbitrary::Arbitrary)]
struct MergeInput {
    primary_len: u8,
    secondary_len: u8,
    before_each: u8,
    per_inject: u8,
}

fuzz_target!(|input: MergeInput| {
    let primary: Vec<u64> = (0..input.primary_len as u64).collect();
    let secondary: Vec<u64> =
        (SECONDARY_BASE..SECONDARY_BASE + input.secondary_len as u64).collect();
    let b = input.before_each as usize;
    let p = input.per_inject as usize;

    let mut interleaver = Interleaver::new(no_hooks());
    interleaver.set_configuration(InjectConfig::new(b, p));
    interleaver.set_secondary_items(secondary.clone());

    let mut ledger = InjectionLedger::new();
    let result = interleaver.inject(primary.clone(), &mut ledger);

    assert_eq!(
        result.items.len(),
        merged_len(primary.len(), secondary.len(), b, p)
    );

    let kept: Vec<u64> = result
        .items
        .iter()
        .copied()
        .filter(|id| *id < SECONDARY_BASE)
        .collect();
    assert_eq!(kept, primary);

    let injected: Vec<u64> = result
        .items
        .iter()
        .copied()
        .filter(|id| *id >= SECONDARY_BASE)
        .collect();
    assert_eq!(&injected[..], &secondary[..injected.len()]);
    assert_eq!(ledger.injected_count(), injected.len());
    assert_eq!(ledger.injectors().len(), result.items.len());
    assert_eq!(result.injected, !injected.is_empty());
});
