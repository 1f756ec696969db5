//! Fetch planning: how many secondary items to ask for, and when to merge.
//!
//! The primary listing shows `size` items per page. One injection cycle uses
//! `b` primary items and `p` secondary items, so a full page needs
//!
//! ```text
//! fetch = ⌊p · size / b⌋
//! ```
//!
//! secondary items. Computed in integer arithmetic, so `p = 3, size = 10,
//! b = 4` gives 7, not the 6 that `p · ⌊size / b⌋` would.
//!
//! A planner is single-use:
//!
//! ```text
//! Idle ──configure / set_query_args──► Configured ──run──► Fired
//! ```
//!
//! `run` on a fired planner returns the primary list untouched.

use crate::config::{InjectConfig, QueryArgs};
use crate::contracts;
use crate::hooks::SharedHooks;
use crate::interleave::Interleaver;
use crate::ledger::InjectionLedger;
use crate::source::QuerySource;
use crate::types::{Identify, InjectorId, PageContext};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Lifecycle of a `FetchPlanner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    Idle,
    Configured,
    Fired,
}

/// Number of secondary items to fetch for one page.
///
/// `None` page size (unlimited listing) yields `None` (fetch everything).
/// `before_each_inject == 0` yields `Some(0)`. Saturates at `usize::MAX`.
pub fn fetch_size(config: &InjectConfig, page_size: Option<usize>) -> Option<usize> {
    let size = page_size?;
    if config.before_each_inject == 0 {
        return Some(0);
    }
    let wanted = config.per_inject as u128 * size as u128 / config.before_each_inject as u128;
    let fetch = usize::try_from(wanted).unwrap_or(usize::MAX);
    contracts::check_fetch_size(config, size, fetch);
    Some(fetch)
}

/// Drives one interleave per rendered page.
pub struct FetchPlanner<T, S> {
    post_types: Vec<String>,
    interleaver: Interleaver<T>,
    source: S,
    hooks: SharedHooks<T>,
    config: InjectConfig,
    query_args: QueryArgs,
    state: PlannerState,
}

impl<T, S> FetchPlanner<T, S> {
    pub fn new(post_types: Vec<String>, source: S, hooks: SharedHooks<T>) -> Self {
        let interleaver = Interleaver::new(hooks.clone());
        Self::with_interleaver(post_types, interleaver, source, hooks)
    }

    pub fn with_interleaver(
        post_types: Vec<String>,
        interleaver: Interleaver<T>,
        source: S,
        hooks: SharedHooks<T>,
    ) -> Self {
        let query_args = QueryArgs {
            post_types: post_types.clone(),
            ..QueryArgs::default()
        };
        FetchPlanner {
            post_types,
            interleaver,
            source,
            hooks,
            config: InjectConfig::default(),
            query_args,
            state: PlannerState::Idle,
        }
    }

    /// Merge caller arguments over `{beforeEachInject: 1, perInject: 1}`.
    pub fn configure(&mut self, args: &Map<String, Value>) {
        self.config = InjectConfig::from_args(args);
        self.mark_configured();
    }

    /// Merge caller query parameters over `{page: current page or 1}`.
    pub fn set_query_args(&mut self, args: &Map<String, Value>, current_page: Option<usize>) {
        self.query_args = QueryArgs::merged(args, current_page.unwrap_or(1), &self.post_types);
        self.mark_configured();
    }

    fn mark_configured(&mut self) {
        if self.state == PlannerState::Idle {
            self.state = PlannerState::Configured;
        }
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn config(&self) -> &InjectConfig {
        &self.config
    }

    pub fn query_args(&self) -> &QueryArgs {
        &self.query_args
    }

    pub fn post_types(&self) -> &[String] {
        &self.post_types
    }

    pub fn interleaver(&self) -> &Interleaver<T> {
        &self.interleaver
    }

    pub fn injector_id(&self) -> InjectorId {
        self.interleaver.id()
    }
}

impl<T, S> FetchPlanner<T, S>
where
    T: Identify + Clone,
    S: QuerySource<T>,
{
    /// Fetch secondary items for this page and merge them into `primary`.
    ///
    /// Returns `primary` unchanged when the configuration is degenerate, the
    /// page is shorter than one chunk, the fetch fails or finds nothing, or
    /// the planner already fired.
    pub fn run(
        &mut self,
        primary: Vec<T>,
        page: &PageContext,
        ledger: &mut InjectionLedger<T::Id>,
    ) -> Vec<T> {
        if self.state == PlannerState::Fired {
            warn!(injector = %self.injector_id(), "planner already fired, leaving list untouched");
            return primary;
        }
        self.state = PlannerState::Fired;

        let before_each = self.config.before_each_inject;
        if before_each == 0 || primary.len() < before_each {
            debug!(
                injector = %self.injector_id(),
                primary = primary.len(),
                before_each,
                "page too short for one injection cycle"
            );
            return primary;
        }

        let filtered = self
            .hooks
            .filter_query_args(self.query_args.clone(), self.injector_id(), &self.config);
        self.query_args = filtered;
        self.query_args.posts_per_page = fetch_size(&self.config, page.requested_page_size);

        let fetched = match self.source.fetch(&self.query_args) {
            Ok(items) => items,
            Err(err) => {
                warn!(injector = %self.injector_id(), error = %err, "fetch failed, skipping injection");
                Vec::new()
            }
        };
        if fetched.is_empty() {
            debug!(injector = %self.injector_id(), "no secondary items found");
            return primary;
        }

        self.interleaver.set_configuration(self.config);
        self.interleaver.set_post_types(self.post_types.clone());
        self.interleaver.set_secondary_items(fetched);
        let result = self.interleaver.inject(primary, ledger);

        info!(
            injector = %self.injector_id(),
            injected = result.injected,
            items = result.items.len(),
            "injection complete"
        );
        result.into_items()
    }
}
