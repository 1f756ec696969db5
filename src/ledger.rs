//! Side-table of injected items.
//!
//! Instead of stamping a field onto caller-owned items, the ledger keeps one
//! slot per item of the current page list: the item's identity and, when an
//! interleaver placed it, that interleaver's id. Slots follow the list
//! through every merge and hook, so two copies of one identity keep their
//! own provenance. A featured post that also sits on the primary page, or a
//! sponsor placed by two sites, resolves per copy.
//!
//! Templates ask by position (`injector_at`, exact) or by item
//! (`get_injector`, the first placed copy of that identity).
//!
//! # Invariants
//!
//! - A slot is tagged only where an interleaver placed a secondary item.
//! - A tagged slot keeps its injector through later merges. Another site
//!   sees it as primary and never re-tags it.

use crate::types::{Identify, InjectorId};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use tracing::debug;

/// Provenance of one item in the page list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<K> {
    pub key: K,
    pub injector: Option<InjectorId>,
}

impl<K> Slot<K> {
    pub fn primary(key: K) -> Self {
        Slot {
            key,
            injector: None,
        }
    }

    pub fn placed(key: K, injector: InjectorId) -> Self {
        Slot {
            key,
            injector: Some(injector),
        }
    }

    pub fn is_injected(&self) -> bool {
        self.injector.is_some()
    }
}

/// Per-slot provenance of a page list, shared by every interleaver on a page.
#[derive(Debug, Clone)]
pub struct InjectionLedger<K> {
    slots: Vec<Slot<K>>,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> InjectionLedger<K> {
    pub fn new() -> Self {
        InjectionLedger { slots: Vec::new() }
    }

    /// Ledger for a fresh list: every item primary.
    pub fn track<T: Identify<Id = K>>(items: &[T]) -> Self {
        InjectionLedger {
            slots: items.iter().map(|item| Slot::primary(item.identity())).collect(),
        }
    }

    pub fn slots(&self) -> &[Slot<K>] {
        &self.slots
    }

    /// Whether the slots describe `items` one for one.
    pub fn is_aligned<T: Identify<Id = K>>(&self, items: &[T]) -> bool {
        self.slots.len() == items.len()
            && self
                .slots
                .iter()
                .zip(items)
                .all(|(slot, item)| slot.key == item.identity())
    }

    /// Re-point the slots at `items`.
    ///
    /// Each item takes the first unused slot with its identity, in list
    /// order. Items without a slot are primary; slots no item claims are
    /// dropped.
    pub fn realign<T: Identify<Id = K>>(&mut self, items: &[T]) {
        if self.is_aligned(items) {
            return;
        }

        let mut unused: HashMap<K, VecDeque<Option<InjectorId>>> = HashMap::new();
        for slot in self.slots.drain(..) {
            unused.entry(slot.key).or_default().push_back(slot.injector);
        }

        let before = unused.values().map(VecDeque::len).sum::<usize>();
        self.slots = items
            .iter()
            .map(|item| {
                let key = item.identity();
                let injector = unused
                    .get_mut(&key)
                    .and_then(|queue| queue.pop_front())
                    .flatten();
                Slot { key, injector }
            })
            .collect();

        if before > 0 {
            debug!(before, after = self.slots.len(), "ledger realigned to list");
        }
    }

    /// Hand the slots over to a merge; the ledger is empty until `replace`.
    pub(crate) fn take_slots(&mut self) -> Vec<Slot<K>> {
        std::mem::take(&mut self.slots)
    }

    pub(crate) fn replace(&mut self, slots: Vec<Slot<K>>) {
        self.slots = slots;
    }

    /// Injector of the item at `position` in the page list.
    pub fn injector_at(&self, position: usize) -> Option<InjectorId> {
        self.slots.get(position).and_then(|slot| slot.injector)
    }

    pub fn is_injected_at(&self, position: usize) -> bool {
        self.injector_at(position).is_some()
    }

    /// Injector of the first placed copy of an identity.
    pub fn injector_of(&self, key: &K) -> Option<InjectorId> {
        self.slots
            .iter()
            .find(|slot| slot.is_injected() && slot.key == *key)
            .and_then(|slot| slot.injector)
    }

    /// Whether any copy of an identity was placed.
    pub fn contains(&self, key: &K) -> bool {
        self.injector_of(key).is_some()
    }

    /// Whether an item was injected by any interleaver.
    pub fn is_injected<T: Identify<Id = K>>(&self, item: &T) -> bool {
        self.contains(&item.identity())
    }

    /// The interleaver that injected an item, if any.
    pub fn get_injector<T: Identify<Id = K>>(&self, item: &T) -> Option<InjectorId> {
        self.injector_of(&item.identity())
    }

    /// Identities one injector placed, in list order.
    pub fn tagged_by(&self, injector: InjectorId) -> Vec<K> {
        self.slots
            .iter()
            .filter(|slot| slot.injector == Some(injector))
            .map(|slot| slot.key.clone())
            .collect()
    }

    /// Per-position injectors, one entry per item of the list.
    pub fn injectors(&self) -> Vec<Option<InjectorId>> {
        self.slots.iter().map(|slot| slot.injector).collect()
    }

    /// Number of placed items in the list.
    pub fn injected_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_injected()).count()
    }

    pub fn has_injections(&self) -> bool {
        self.slots.iter().any(Slot::is_injected)
    }

    /// Forget every slot (a new page render).
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> Default for InjectionLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Template helper: was `item` injected?
pub fn is_injected<T: Identify>(ledger: &InjectionLedger<T::Id>, item: &T) -> bool {
    ledger.is_injected(item)
}

/// Template helper: which interleaver injected `item`?
pub fn get_injector<T: Identify>(ledger: &InjectionLedger<T::Id>, item: &T) -> Option<InjectorId> {
    ledger.get_injector(item)
}

/// Template helper: which interleaver placed the item at `position`?
pub fn injector_at<K>(ledger: &InjectionLedger<K>, position: usize) -> Option<InjectorId>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    ledger.injector_at(position)
}
