//! Reference oracles for differential testing.
//!
//! Simple, obviously-correct implementations written as plain index loops.
//! They serve as ground truth for the chunk/zip/flatten pipeline.

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

/// Walk the primary list and, at every chunk end, copy up to `per_inject`
/// secondary items.
///
/// A chunk ends every `before_each` items and at the last primary item.
pub fn oracle_merge(
    primary: &[u64],
    secondary: &[u64],
    before_each: usize,
    per_inject: usize,
) -> Vec<u64> {
    if primary.is_empty() || secondary.is_empty() || before_each == 0 {
        return primary.to_vec();
    }

    let mut out = Vec::with_capacity(primary.len() + secondary.len());
    let mut next = 0;
    for (i, item) in primary.iter().enumerate() {
        out.push(*item);
        let chunk_end = (i + 1) % before_each == 0 || i + 1 == primary.len();
        if chunk_end {
            for _ in 0..per_inject {
                if next < secondary.len() {
                    out.push(secondary[next]);
                    next += 1;
                }
            }
        }
    }
    out
}

/// Closed-form merged length.
pub fn oracle_merged_len(primary: usize, secondary: usize, before_each: usize, per_inject: usize) -> usize {
    if primary == 0 || secondary == 0 || before_each == 0 {
        return primary;
    }
    let cycles = primary.div_ceil(before_each);
    primary + secondary.min(per_inject * cycles)
}

/// Fetch size by repeated subtraction: how many whole `b`s fit in `p * size`.
pub fn oracle_fetch_size(before_each: usize, per_inject: usize, page_size: usize) -> usize {
    if before_each == 0 {
        return 0;
    }
    let mut remaining = per_inject as u128 * page_size as u128;
    let mut count = 0usize;
    while remaining >= before_each as u128 {
        remaining -= before_each as u128;
        count += 1;
    }
    count
}
