//! The "posts list finalized" event and injection registration.
//!
//! A page render produces its primary list once. Listeners registered on
//! `PostsEvent` get to rewrite that list in registration order; each sees the
//! output of the one before. A one-shot listener is detached as soon as it
//! runs, so a planner fires at most once even if the host dispatches the
//! event again (a secondary loop on the same page, for instance).
//!
//! `register_injection` is the entry point a template calls. It refuses to
//! register when the request cannot carry injections:
//!
//! | Condition                                  | Error              |
//! |--------------------------------------------|--------------------|
//! | admin screen                               | `AdminContext`     |
//! | event already dispatched for this page     | `AlreadyFired`     |
//! | no post types given                        | `NoPostTypes`      |
//! | none of the given post types exist         | `UnknownPostTypes` |
//!
//! Unknown types in a list with at least one known type are dropped.

use crate::hooks::SharedHooks;
use crate::ledger::InjectionLedger;
use crate::planner::FetchPlanner;
use crate::source::QuerySource;
use crate::types::{Identify, InjectorId, PageContext};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Something that rewrites the finalized posts list.
pub trait PostsListener<T: Identify> {
    fn on_posts(
        &mut self,
        posts: Vec<T>,
        page: &PageContext,
        ledger: &mut InjectionLedger<T::Id>,
    ) -> Vec<T>;

    /// Detach after the first invocation.
    fn is_one_shot(&self) -> bool {
        false
    }
}

impl<T, S> PostsListener<T> for FetchPlanner<T, S>
where
    T: Identify + Clone,
    S: QuerySource<T>,
{
    fn on_posts(
        &mut self,
        posts: Vec<T>,
        page: &PageContext,
        ledger: &mut InjectionLedger<T::Id>,
    ) -> Vec<T> {
        self.run(posts, page, ledger)
    }

    fn is_one_shot(&self) -> bool {
        true
    }
}

/// Ordered listeners for the finalized posts list.
pub struct PostsEvent<T: Identify> {
    listeners: Vec<Box<dyn PostsListener<T>>>,
    fired: bool,
}

impl<T: Identify> PostsEvent<T> {
    pub fn new() -> Self {
        PostsEvent {
            listeners: Vec::new(),
            fired: false,
        }
    }

    pub fn listen(&mut self, listener: Box<dyn PostsListener<T>>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Run every listener over `posts`, dropping one-shot listeners.
    ///
    /// `ledger` is kept slot-for-slot with the list between listeners, so a
    /// listener that rewrites the list without merging does not shift the
    /// tags of items placed before it.
    pub fn dispatch(
        &mut self,
        posts: Vec<T>,
        page: &PageContext,
        ledger: &mut InjectionLedger<T::Id>,
    ) -> Vec<T> {
        let listeners = std::mem::take(&mut self.listeners);
        let mut kept = Vec::with_capacity(listeners.len());
        let mut posts = posts;
        ledger.realign(&posts);

        for mut listener in listeners {
            posts = listener.on_posts(posts, page, ledger);
            ledger.realign(&posts);
            if !listener.is_one_shot() {
                kept.push(listener);
            }
        }

        debug!(
            remaining = kept.len(),
            posts = posts.len(),
            "posts event dispatched"
        );
        self.listeners = kept;
        self.fired = true;
        posts
    }
}

impl<T: Identify> Default for PostsEvent<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// What the host knows about the current request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub is_admin: bool,
    pub known_post_types: HashSet<String>,
    pub current_page: Option<usize>,
}

impl RequestContext {
    pub fn new<I, S>(known_post_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RequestContext {
            is_admin: false,
            known_post_types: known_post_types.into_iter().map(Into::into).collect(),
            current_page: None,
        }
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn on_page(mut self, page: usize) -> Self {
        self.current_page = Some(page);
        self
    }

    pub fn post_type_exists(&self, post_type: &str) -> bool {
        self.known_post_types.contains(post_type)
    }
}

/// One injection site: which post types to inject, how, and with which
/// extra query filters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectionRequest {
    pub post_types: Vec<String>,
    #[serde(default)]
    pub args: Map<String, Value>,
    #[serde(default)]
    pub query_args: Map<String, Value>,
}

impl InjectionRequest {
    pub fn new<I, S>(post_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InjectionRequest {
            post_types: post_types.into_iter().map(Into::into).collect(),
            ..InjectionRequest::default()
        }
    }

    pub fn with_arg(mut self, key: &str, value: Value) -> Self {
        self.args.insert(key.to_string(), value);
        self
    }

    pub fn with_query_arg(mut self, key: &str, value: Value) -> Self {
        self.query_args.insert(key.to_string(), value);
        self
    }
}

/// Why an injection was not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("injections are not registered on admin screens")]
    AdminContext,

    #[error("the posts event already fired for this page")]
    AlreadyFired,

    #[error("no post types given")]
    NoPostTypes,

    #[error("unknown post types: {}", .0.join(", "))]
    UnknownPostTypes(Vec<String>),
}

/// Register a one-shot injection on `event`.
///
/// Returns the identity of the interleaver that will tag this site's items.
pub fn register_injection<T, S>(
    event: &mut PostsEvent<T>,
    ctx: &RequestContext,
    request: &InjectionRequest,
    source: S,
    hooks: SharedHooks<T>,
) -> Result<InjectorId, RegisterError>
where
    T: Identify + Clone + 'static,
    S: QuerySource<T> + 'static,
{
    if ctx.is_admin {
        return Err(RegisterError::AdminContext);
    }
    if event.has_fired() {
        return Err(RegisterError::AlreadyFired);
    }
    if request.post_types.is_empty() {
        return Err(RegisterError::NoPostTypes);
    }

    let post_types: Vec<String> = request
        .post_types
        .iter()
        .filter(|post_type| ctx.post_type_exists(post_type))
        .cloned()
        .collect();
    if post_types.is_empty() {
        return Err(RegisterError::UnknownPostTypes(request.post_types.clone()));
    }

    let mut planner = FetchPlanner::new(post_types, source, hooks);
    planner.configure(&request.args);
    planner.set_query_args(&request.query_args, ctx.current_page);

    let id = planner.injector_id();
    info!(
        injector = %id,
        post_types = ?planner.post_types(),
        before_each = planner.config().before_each_inject,
        per_inject = planner.config().per_inject,
        "injection registered"
    );
    event.listen(Box::new(planner));
    Ok(id)
}
