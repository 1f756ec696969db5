//! Extension points around a merge.
//!
//! Two kinds of hook:
//!
//! | Hook                | Kind         | When                                   |
//! |---------------------|--------------|----------------------------------------|
//! | `before_inject`     | notification | merge path only, before chunking       |
//! | `after_inject`      | notification | merge path only, after flattening      |
//! | `post_process`      | transform    | every `inject` call, may replace list  |
//! | `filter_query_args` | transform    | before the planner fetches             |
//!
//! Notifications get shared references and cannot change the outcome.
//! Transforms take ownership and return the replacement.
//!
//! Every method has a no-op default, so an observer implements only what it
//! cares about. `HookChain` runs several observers in registration order,
//! threading each transform's output into the next one.

use crate::config::{InjectConfig, QueryArgs};
use crate::interleave::Interleaver;
use crate::types::InjectorId;
use std::rc::Rc;

/// Observer/transform interface for interleaving.
pub trait InjectHooks<T> {
    /// Called with the interleaver, the secondary items and the primary items
    /// right before a merge starts.
    fn before_inject(&self, _interleaver: &Interleaver<T>, _secondary: &[T], _primary: &[T]) {}

    /// Called with the interleaver, the merged items and the secondary items
    /// right after a merge finishes.
    fn after_inject(&self, _interleaver: &Interleaver<T>, _merged: &[T], _secondary: &[T]) {}

    /// Final say over the list `inject` returns.
    fn post_process(
        &self,
        merged: Vec<T>,
        _injected: bool,
        _interleaver: &Interleaver<T>,
        _secondary: &[T],
    ) -> Vec<T> {
        merged
    }

    /// Final say over the query the planner is about to run. `injector`
    /// identifies the planner's interleaver.
    fn filter_query_args(
        &self,
        args: QueryArgs,
        _injector: InjectorId,
        _config: &InjectConfig,
    ) -> QueryArgs {
        args
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<T> InjectHooks<T> for NoHooks {}

/// Shared handle to a hook implementation.
pub type SharedHooks<T> = Rc<dyn InjectHooks<T>>;

/// Create the default (no-op) shared hooks.
pub fn no_hooks<T>() -> SharedHooks<T> {
    Rc::new(NoHooks)
}

/// Several hook implementations applied in order.
pub struct HookChain<T> {
    hooks: Vec<SharedHooks<T>>,
}

impl<T> HookChain<T> {
    pub fn new() -> Self {
        HookChain { hooks: Vec::new() }
    }

    pub fn with_hooks(hooks: Vec<SharedHooks<T>>) -> Self {
        HookChain { hooks }
    }

    /// Append a hook. Later hooks see the output of earlier transforms.
    pub fn push(&mut self, hook: SharedHooks<T>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn into_shared(self) -> SharedHooks<T>
    where
        T: 'static,
    {
        Rc::new(self)
    }
}

impl<T> Default for HookChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InjectHooks<T> for HookChain<T> {
    fn before_inject(&self, interleaver: &Interleaver<T>, secondary: &[T], primary: &[T]) {
        for hook in &self.hooks {
            hook.before_inject(interleaver, secondary, primary);
        }
    }

    fn after_inject(&self, interleaver: &Interleaver<T>, merged: &[T], secondary: &[T]) {
        for hook in &self.hooks {
            hook.after_inject(interleaver, merged, secondary);
        }
    }

    fn post_process(
        &self,
        merged: Vec<T>,
        injected: bool,
        interleaver: &Interleaver<T>,
        secondary: &[T],
    ) -> Vec<T> {
        self.hooks.iter().fold(merged, |items, hook| {
            hook.post_process(items, injected, interleaver, secondary)
        })
    }

    fn filter_query_args(
        &self,
        args: QueryArgs,
        injector: InjectorId,
        config: &InjectConfig,
    ) -> QueryArgs {
        self.hooks
            .iter()
            .fold(args, |args, hook| hook.filter_query_args(args, injector, config))
    }
}
