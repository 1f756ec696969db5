// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The interleaver: one merge of a primary list with a secondary list.
//!
//! An `Interleaver` is configured once, handed its secondary items, and then
//! asked to `inject` into one primary list. It holds no other state, so a
//! fresh instance per injection site and page is the normal lifecycle.
//!
//! ```text
//! inject(primary)
//!   ├─ either list empty ──────────────────────────► post_process(primary)
//!   ├─ before_inject(self, secondary, primary)
//!   ├─ chunk ─► zip ─► flatten ─► carry primary slots, tag placed ones
//!   ├─ after_inject(self, merged, secondary)
//!   ├─ post_process(merged, injected, self, secondary)
//!   └─ realign the ledger to the returned list
//! ```

pub mod chunk;

pub use chunk::{
    consumed_secondary, flatten, interleave_chunks, merged_len, partition, partition_cloned,
    Origin, Segment,
};

use crate::config::InjectConfig;
use crate::contracts;
use crate::hooks::SharedHooks;
use crate::ledger::{InjectionLedger, Slot};
use crate::types::{Identify, InjectorId, MergeResult};
use std::fmt;
use tracing::debug;

/// Merges secondary items into a primary list at fixed intervals.
pub struct Interleaver<T> {
    id: InjectorId,
    config: InjectConfig,
    secondary: Vec<T>,
    post_types: Vec<String>,
    hooks: SharedHooks<T>,
}

impl<T> Interleaver<T> {
    /// New interleaver with a fresh identity, default configuration and no
    /// secondary items.
    pub fn new(hooks: SharedHooks<T>) -> Self {
        Self::with_id(InjectorId::new(), hooks)
    }

    pub fn with_id(id: InjectorId, hooks: SharedHooks<T>) -> Self {
        Interleaver {
            id,
            config: InjectConfig::default(),
            secondary: Vec::new(),
            post_types: Vec::new(),
            hooks,
        }
    }

    pub fn id(&self) -> InjectorId {
        self.id
    }

    pub fn config(&self) -> &InjectConfig {
        &self.config
    }

    pub fn secondary(&self) -> &[T] {
        &self.secondary
    }

    pub fn set_configuration(&mut self, config: InjectConfig) {
        self.config = config;
    }

    pub fn set_secondary_items(&mut self, items: Vec<T>) {
        self.secondary = items;
    }

    /// Post types the secondary items were fetched from. Empty when the
    /// items were handed over directly.
    pub fn post_types(&self) -> &[String] {
        &self.post_types
    }

    pub fn set_post_types(&mut self, post_types: Vec<String>) {
        self.post_types = post_types;
    }
}

impl<T: Identify + Clone> Interleaver<T> {
    /// Merge the secondary items into `primary`.
    ///
    /// `ledger` describes `primary` slot by slot (it is realigned first if
    /// it does not). Primary slots keep their tags; every placed secondary
    /// item gets a slot tagged with this interleaver's id. With either list
    /// empty, `primary` comes back unchanged and `injected` is false.
    pub fn inject(
        &self,
        primary: Vec<T>,
        ledger: &mut InjectionLedger<T::Id>,
    ) -> MergeResult<T> {
        let secondary = self.secondary.as_slice();
        ledger.realign(&primary);

        if primary.is_empty() || secondary.is_empty() {
            debug!(
                injector = %self.id,
                primary = primary.len(),
                secondary = secondary.len(),
                "nothing to interleave"
            );
            let items = self.hooks.post_process(primary, false, self, secondary);
            ledger.realign(&items);
            return MergeResult::untouched(items);
        }

        self.hooks.before_inject(self, secondary, &primary);

        let original_len = primary.len();
        let primary_ids: Vec<T::Id> = if cfg!(debug_assertions) {
            primary.iter().map(Identify::identity).collect()
        } else {
            Vec::new()
        };

        let (merged, origins) = self.merge(primary);
        let mut carried = ledger.take_slots().into_iter();
        let slots = merged
            .iter()
            .zip(&origins)
            .map(|(item, origin)| match origin {
                Origin::Primary => carried
                    .next()
                    .unwrap_or_else(|| Slot::primary(item.identity())),
                Origin::Secondary => Slot::placed(item.identity(), self.id),
            })
            .collect();
        ledger.replace(slots);
        let injected = merged.len() > original_len;

        if cfg!(debug_assertions) {
            let secondary_ids: Vec<T::Id> = secondary.iter().map(Identify::identity).collect();
            let merged_ids: Vec<T::Id> = merged.iter().map(Identify::identity).collect();
            contracts::check_merged_len(original_len, secondary.len(), &self.config, merged.len());
            contracts::check_primary_order(&primary_ids, &merged_ids, &origins);
            contracts::check_injected_prefix(&secondary_ids, &merged_ids, &origins);
        }

        debug!(
            injector = %self.id,
            primary = original_len,
            secondary = secondary.len(),
            merged = merged.len(),
            injected,
            "interleaved"
        );

        self.hooks.after_inject(self, &merged, secondary);
        let items = self.hooks.post_process(merged, injected, self, secondary);
        ledger.realign(&items);
        MergeResult { items, injected }
    }

    fn merge(&self, primary: Vec<T>) -> (Vec<T>, Vec<Origin>) {
        let InjectConfig {
            before_each_inject,
            per_inject,
        } = self.config;

        // Zero-sized primary chunks would swallow the whole list.
        if before_each_inject == 0 {
            let origins = vec![Origin::Primary; primary.len()];
            return (primary, origins);
        }

        let primary_chunks = partition(primary, before_each_inject);
        let secondary_chunks = partition_cloned(&self.secondary, per_inject, primary_chunks.len());
        flatten(interleave_chunks(primary_chunks, secondary_chunks))
    }
}

impl<T> fmt::Debug for Interleaver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interleaver")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("secondary", &self.secondary.len())
            .field("post_types", &self.post_types)
            .finish_non_exhaustive()
    }
}
