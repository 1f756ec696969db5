//! Differential testing: compare the interleaver against the oracles.
//!
//! If they disagree, the oracle is right.

use super::oracles::{oracle_fetch_size, oracle_merge, oracle_merged_len};
use crate::common::merge_u64;
use crate::{merge_config_strategy, primary_strategy, secondary_strategy};
use chunkweave::{fetch_size, merged_len, InjectConfig};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Differential test: merged items match the index-loop oracle.
    #[test]
    fn diff_merge_matches_oracle(
        primary in primary_strategy(),
        secondary in secondary_strategy(),
        (b, p) in merge_config_strategy(),
    ) {
        let (result, _) = merge_u64(primary.clone(), secondary.clone(), b, p);
        prop_assert_eq!(result.items, oracle_merge(&primary, &secondary, b, p));
    }

    /// Differential test: the library's closed form matches the oracle's.
    #[test]
    fn diff_merged_len_matches_oracle(
        primary in 0usize..200,
        secondary in 0usize..200,
        b in 0usize..20,
        p in 0usize..20,
    ) {
        prop_assert_eq!(merged_len(primary, secondary, b, p), oracle_merged_len(primary, secondary, b, p));
    }

    /// Differential test: fetch size matches counting by subtraction.
    #[test]
    fn diff_fetch_size_matches_oracle(
        b in 0usize..16,
        p in 0usize..16,
        size in 0usize..200,
    ) {
        prop_assert_eq!(
            fetch_size(&InjectConfig::new(b, p), Some(size)),
            Some(oracle_fetch_size(b, p, size))
        );
    }
}
