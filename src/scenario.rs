//! A whole page render described as data.
//!
//! A `Scenario` is a content store, the primary post type, the injection
//! sites a template would register and the paging of the listing. `run`
//! plays it through the same path a host uses: page the primary listing,
//! register every injection, dispatch the posts event once.
//!
//! ```json
//! {
//!   "posts": [{"id": 1, "postType": "post", "title": "Hello"}],
//!   "primaryType": "post",
//!   "injections": [{"postTypes": ["sponsor"], "args": {"beforeEachInject": 3}}],
//!   "pageSize": 10,
//!   "page": 1,
//!   "isAdmin": false
//! }
//! ```

use crate::config::{load_json, ConfigError, QueryArgs};
use crate::event::{register_injection, InjectionRequest, PostsEvent, RequestContext};
use crate::hooks::no_hooks;
use crate::ledger::InjectionLedger;
use crate::source::{FetchError, MemorySource, QuerySource};
use crate::types::{InjectorId, PageContext, Post};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// One page render.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub posts: Vec<Post>,
    #[serde(default = "default_primary_type")]
    pub primary_type: String,
    #[serde(default)]
    pub injections: Vec<InjectionRequest>,
    /// Primary posts per page. Absent means the listing is not paged.
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default)]
    pub is_admin: bool,
}

fn default_primary_type() -> String {
    "post".to_string()
}

fn first_page() -> usize {
    1
}

/// A rendered row: the post and, if injected, the site that placed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    #[serde(flatten)]
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injector: Option<InjectorId>,
}

impl ReportRow {
    pub fn is_injected(&self) -> bool {
        self.injector.is_some()
    }
}

/// Outcome of `Scenario::run`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub rows: Vec<ReportRow>,
    pub registered: Vec<InjectorId>,
    /// Registration refusals, as messages.
    pub refused: Vec<String>,
}

impl SimulationReport {
    pub fn injected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_injected()).count()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.post.id).collect()
    }
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// Post types the store knows about: every type present plus the
    /// primary type.
    pub fn known_post_types(&self) -> HashSet<String> {
        let mut types: HashSet<String> = self.posts.iter().map(|p| p.post_type.clone()).collect();
        types.insert(self.primary_type.clone());
        types
    }

    pub fn page_context(&self) -> PageContext {
        PageContext {
            requested_page_size: self.page_size,
            current_page: Some(self.page),
        }
    }

    /// The primary listing for this page, before any injection.
    pub fn primary_page(&self, store: &MemorySource) -> Result<Vec<Post>, FetchError> {
        let args = QueryArgs {
            post_types: vec![self.primary_type.clone()],
            posts_per_page: self.page_size,
            page: self.page,
            ..QueryArgs::default()
        };
        store.fetch(&args)
    }

    pub fn run(&self) -> Result<SimulationReport, FetchError> {
        let store = MemorySource::new(self.posts.clone());
        let primary = self.primary_page(&store)?;

        let mut ctx = RequestContext::new(self.known_post_types()).on_page(self.page);
        ctx.is_admin = self.is_admin;

        let mut event: PostsEvent<Post> = PostsEvent::new();
        let mut report = SimulationReport::default();
        for request in &self.injections {
            match register_injection(&mut event, &ctx, request, store.clone(), no_hooks()) {
                Ok(id) => report.registered.push(id),
                Err(err) => {
                    warn!(post_types = ?request.post_types, error = %err, "injection refused");
                    report.refused.push(err.to_string());
                }
            }
        }

        let mut ledger = InjectionLedger::new();
        let merged = event.dispatch(primary, &self.page_context(), &mut ledger);

        report.rows = merged
            .into_iter()
            .enumerate()
            .map(|(position, post)| ReportRow {
                post,
                injector: ledger.injector_at(position),
            })
            .collect();
        Ok(report)
    }
}
