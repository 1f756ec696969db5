// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of an interleave.
//!
//! The merge core is generic over anything with a stable identity. It never
//! looks inside an item; it only moves items around and records, by identity,
//! which ones came from the secondary list.
//!
//! | Type            | Purpose                                              |
//! |-----------------|------------------------------------------------------|
//! | `Identify`      | Stable identity of an item (the only thing we read)  |
//! | `InjectorId`    | Identity of one `Interleaver` instance               |
//! | `Post`          | Concrete item used by the CLI and `MemorySource`     |
//! | `MergeResult`   | Merged list plus the "was anything injected" flag    |
//! | `PageContext`   | Page size and page number of the primary listing     |
//!
//! # Invariants
//!
//! - **MergeResult**: `injected ⇔ items.len() > primary.len()` at the moment
//!   the merge finishes (before any post-processing hook runs).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use uuid::Uuid;

/// Stable identity of an item.
///
/// Tagging is keyed by this identity, so two values with the same identity
/// are the same item as far as the injection ledger is concerned.
pub trait Identify {
    type Id: Eq + Hash + Clone + fmt::Debug;

    fn identity(&self) -> Self::Id;
}

impl Identify for u64 {
    type Id = u64;

    fn identity(&self) -> u64 {
        *self
    }
}

impl Identify for String {
    type Id = String;

    fn identity(&self) -> String {
        self.clone()
    }
}

/// Identity of an `Interleaver` instance.
///
/// Every interleaver gets a fresh random id at construction; the ledger stores
/// it next to each item the interleaver injected so callers can tell several
/// injection sites on the same page apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InjectorId(Uuid);

impl InjectorId {
    pub fn new() -> Self {
        InjectorId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InjectorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InjectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for InjectorId {
    fn from(uuid: Uuid) -> Self {
        InjectorId(uuid)
    }
}

/// A content record as the host store hands it over.
///
/// Only `id` matters to the merge. `post_type` and `meta` are read by
/// `MemorySource` when answering queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

fn default_post_type() -> String {
    "post".to_string()
}

impl Post {
    pub fn new(id: u64, post_type: &str, title: &str) -> Self {
        Post {
            id,
            post_type: post_type.to_string(),
            title: title.to_string(),
            meta: BTreeMap::new(),
        }
    }

    /// Builder-style meta setter.
    pub fn with_meta(mut self, key: &str, value: &str) -> Self {
        self.meta.insert(key.to_string(), value.to_string());
        self
    }
}

impl Identify for Post {
    type Id = u64;

    fn identity(&self) -> u64 {
        self.id
    }
}

/// Outcome of one `Interleaver::inject` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult<T> {
    pub items: Vec<T>,
    /// True iff the merge produced more items than the primary list had.
    pub injected: bool,
}

impl<T> MergeResult<T> {
    /// The no-op outcome: primary items unchanged, nothing injected.
    pub fn untouched(items: Vec<T>) -> Self {
        MergeResult {
            items,
            injected: false,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// What the primary listing asked the store for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Items per page of the primary listing. `None` means unlimited.
    pub requested_page_size: Option<usize>,
    /// 1-based page number, `None` when the listing is not paged.
    pub current_page: Option<usize>,
}

impl PageContext {
    pub fn new(requested_page_size: usize) -> Self {
        PageContext {
            requested_page_size: Some(requested_page_size),
            current_page: None,
        }
    }

    pub fn unlimited() -> Self {
        PageContext::default()
    }

    pub fn on_page(mut self, page: usize) -> Self {
        self.current_page = Some(page);
        self
    }

    /// Current page, falling back to 1 when missing or 0.
    pub fn page_or_first(&self) -> usize {
        match self.current_page {
            Some(page) if page > 0 => page,
            _ => 1,
        }
    }
}
