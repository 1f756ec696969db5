//! Interleave sponsored items into a primary listing at fixed intervals.
//!
//! A page shows a primary list (posts, products, search hits). Every
//! `before_each_inject` primary items, `per_inject` items from a secondary
//! source are placed after them. Injected items are recorded in a ledger so
//! templates can render them differently.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────────┐
//! │   event.rs   │────▶│  planner.rs   │────▶│  source.rs       │
//! │ (PostsEvent, │     │ (FetchPlanner,│     │  (QuerySource,   │
//! │  register_   │     │  fetch_size)  │     │   MemorySource)  │
//! │  injection)  │     └───────────────┘     └──────────────────┘
//! └──────────────┘             │
//!                              ▼
//!                     ┌─────────────────┐     ┌──────────────────┐
//!                     │  interleave/    │────▶│   ledger.rs      │
//!                     │ (Interleaver,   │     │ (InjectionLedger)│
//!                     │  chunk, zip)    │     └──────────────────┘
//!                     └─────────────────┘
//!                              │
//!        ┌─────────────────────┼──────────────────────┐
//!        ▼                     ▼                      ▼
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────┐
//! │  hooks.rs   │     │  contracts.rs   │     │  config.rs   │
//! │ (InjectHooks│     │ (debug-mode     │     │ (InjectConfig│
//! │  HookChain) │     │  invariants)    │     │  QueryArgs)  │
//! └─────────────┘     └─────────────────┘     └──────────────┘
//! ```
//!
//! # Properties
//!
//! | Module       | Property                                                 |
//! |--------------|----------------------------------------------------------|
//! | `interleave` | primary items keep their relative order                  |
//! | `interleave` | injected items are a prefix of the secondary list         |
//! | `interleave` | `len = len(P) + min(len(S), p·⌈len(P)/b⌉)`                |
//! | `planner`    | `fetch = ⌊p·size/b⌋`, one run per planner                 |
//! | `ledger`     | first injector to place an identity keeps the tag         |
//!
//! # Usage
//!
//! ```
//! use chunkweave::{no_hooks, InjectConfig, InjectionLedger, Interleaver};
//!
//! let mut interleaver = Interleaver::new(no_hooks());
//! interleaver.set_configuration(InjectConfig::new(3, 1));
//! interleaver.set_secondary_items(vec![101u64, 102]);
//!
//! let mut ledger = InjectionLedger::new();
//! let result = interleaver.inject(vec![1, 2, 3, 4, 5, 6], &mut ledger);
//!
//! assert_eq!(result.items, vec![1, 2, 3, 101, 4, 5, 6, 102]);
//! assert!(ledger.contains(&101));
//! ```

// Module declarations
pub mod config;
pub mod contracts;
pub mod event;
pub mod hooks;
pub mod interleave;
pub mod ledger;
pub mod planner;
pub mod scenario;
pub mod source;
mod types;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::{
    coerce_count, load_json, ConfigError, InjectConfig, QueryArgs, DEFAULT_BEFORE_EACH_INJECT,
    DEFAULT_PER_INJECT,
};
pub use event::{
    register_injection, InjectionRequest, PostsEvent, PostsListener, RegisterError, RequestContext,
};
pub use hooks::{no_hooks, HookChain, InjectHooks, NoHooks, SharedHooks};
pub use interleave::{merged_len, Interleaver, Origin};
pub use ledger::{get_injector, injector_at, is_injected, InjectionLedger, Slot};
pub use planner::{fetch_size, FetchPlanner, PlannerState};
pub use scenario::{ReportRow, Scenario, SimulationReport};
pub use source::{FetchError, MemorySource, QuerySource};
pub use types::{Identify, InjectorId, MergeResult, PageContext, Post};
