// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chunk, zip, flatten.
//!
//! ```text
//! primary   [p1 p2 p3][p4 p5 p6][p7]        chunks of before_each_inject
//! secondary [s1][s2][s3][s4]                chunks of per_inject
//!
//! zip       [p1 p2 p3][s1][p4 p5 p6][s2][p7][s3]     s4 is dropped
//! flatten    p1 p2 p3 s1 p4 p5 p6 s2 p7 s3
//! ```
//!
//! The primary chunk count decides how many secondary chunks are consumed.
//! Secondary chunks beyond that are discarded, never appended at the end.
//! When secondary chunks run out first, the remaining primary chunks follow
//! with nothing between them.
//!
//! A chunk size of 0 yields no chunks at all. `slice::chunks(0)` panics, so
//! every partition here checks the size first.

/// Where an item in a merged list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Primary,
    Secondary,
}

/// One chunk in the zipped sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<T> {
    Primary(Vec<T>),
    Injected(Vec<T>),
}

/// Split `items` left to right into chunks of at most `size` items.
///
/// Returns no chunks when `size == 0` or `items` is empty.
pub fn partition<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    if size == 0 || items.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(size).collect());
    }
    chunks
}

/// Borrowing variant of [`partition`] that clones at most `limit` chunks.
///
/// The interleaver keeps its secondary list for the hooks, so it clones just
/// the chunks the zip will consume.
pub fn partition_cloned<T: Clone>(items: &[T], size: usize, limit: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).take(limit).map(<[T]>::to_vec).collect()
}

/// Zip primary chunks with secondary chunks, one secondary chunk after each
/// primary chunk, until primary chunks are exhausted.
pub fn interleave_chunks<T>(primary: Vec<Vec<T>>, secondary: Vec<Vec<T>>) -> Vec<Segment<T>> {
    let mut segments = Vec::with_capacity(primary.len() * 2);
    let mut injections = secondary.into_iter();

    for chunk in primary {
        segments.push(Segment::Primary(chunk));
        if let Some(injection) = injections.next() {
            segments.push(Segment::Injected(injection));
        }
    }
    segments
}

/// Flatten segments into one list, recording each item's origin.
///
/// `items[i]` came from `origins[i]`.
pub fn flatten<T>(segments: Vec<Segment<T>>) -> (Vec<T>, Vec<Origin>) {
    let total = segments
        .iter()
        .map(|segment| match segment {
            Segment::Primary(chunk) | Segment::Injected(chunk) => chunk.len(),
        })
        .sum();

    let mut items = Vec::with_capacity(total);
    let mut origins = Vec::with_capacity(total);
    for segment in segments {
        let (chunk, origin) = match segment {
            Segment::Primary(chunk) => (chunk, Origin::Primary),
            Segment::Injected(chunk) => (chunk, Origin::Secondary),
        };
        origins.extend(std::iter::repeat(origin).take(chunk.len()));
        items.extend(chunk);
    }
    (items, origins)
}

/// Number of secondary items a merge consumes.
///
/// `min(secondary_len, per_inject * ceil(primary_len / before_each_inject))`,
/// or 0 whenever either list is empty or either count is 0.
pub fn consumed_secondary(
    primary_len: usize,
    secondary_len: usize,
    before_each_inject: usize,
    per_inject: usize,
) -> usize {
    if primary_len == 0 || secondary_len == 0 || before_each_inject == 0 || per_inject == 0 {
        return 0;
    }
    let cycles = primary_len.div_ceil(before_each_inject);
    secondary_len.min(per_inject.saturating_mul(cycles))
}

/// Length of the merged list for the given sizes.
pub fn merged_len(
    primary_len: usize,
    secondary_len: usize,
    before_each_inject: usize,
    per_inject: usize,
) -> usize {
    primary_len + consumed_secondary(primary_len, secondary_len, before_each_inject, per_inject)
}
