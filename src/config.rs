//! Configuration: injection settings, query parameters, and input files.
//!
//! Callers hand settings over as loose JSON (the way a template author would
//! write them), so everything here is lenient. Counts are coerced to
//! non-negative integers instead of rejected: a negative, fractional-negative
//! or non-numeric value becomes 0, which downstream means "never chunk" for
//! `before_each_inject` and "inject nothing" for `per_inject`. Callers rely on
//! that degenerate setting to switch injection off, so it is not an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Primary items per chunk when the caller does not say.
pub const DEFAULT_BEFORE_EACH_INJECT: usize = 1;
/// Secondary items per injection cycle when the caller does not say.
pub const DEFAULT_PER_INJECT: usize = 1;

/// Errors reading configuration or payload files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// COUNT COERCION
// ============================================================================

/// Coerce a loose JSON value to a non-negative count.
///
/// | Input                       | Result                 |
/// |-----------------------------|------------------------|
/// | non-negative integer        | the integer            |
/// | negative number             | 0                      |
/// | finite float                | truncated, clamped at 0|
/// | numeric string (`" 3 "`)    | parsed as above        |
/// | `true` / `false`            | 1 / 0                  |
/// | anything else               | 0                      |
pub fn coerce_count(value: &Value) -> usize {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                usize::try_from(u).unwrap_or(usize::MAX)
            } else if n.as_i64().is_some() {
                0
            } else {
                n.as_f64().map_or(0, clamp_float)
            }
        }
        Value::String(s) => coerce_str(s),
        Value::Bool(b) => usize::from(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

fn coerce_str(raw: &str) -> usize {
    let trimmed = raw.trim();
    if let Ok(u) = trimmed.parse::<u64>() {
        return usize::try_from(u).unwrap_or(usize::MAX);
    }
    if trimmed.parse::<i64>().is_ok() {
        return 0;
    }
    trimmed.parse::<f64>().map_or(0, clamp_float)
}

fn clamp_float(f: f64) -> usize {
    if !f.is_finite() || f <= 0.0 {
        return 0;
    }
    // `as` saturates at usize::MAX for huge values
    f.trunc() as usize
}

// ============================================================================
// INJECTION CONFIG
// ============================================================================

/// How many primary items go before each injection, and how many secondary
/// items each injection inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectConfig {
    #[serde(
        default = "default_before_each",
        deserialize_with = "deserialize_count"
    )]
    pub before_each_inject: usize,
    #[serde(default = "default_per_inject", deserialize_with = "deserialize_count")]
    pub per_inject: usize,
}

fn default_before_each() -> usize {
    DEFAULT_BEFORE_EACH_INJECT
}

fn default_per_inject() -> usize {
    DEFAULT_PER_INJECT
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(coerce_count(&raw))
}

impl Default for InjectConfig {
    fn default() -> Self {
        InjectConfig {
            before_each_inject: DEFAULT_BEFORE_EACH_INJECT,
            per_inject: DEFAULT_PER_INJECT,
        }
    }
}

impl InjectConfig {
    pub fn new(before_each_inject: usize, per_inject: usize) -> Self {
        InjectConfig {
            before_each_inject,
            per_inject,
        }
    }

    /// Merge caller arguments over the defaults and coerce both counts.
    ///
    /// Accepts both `beforeEachInject` and `before_each_inject` spellings.
    /// Unknown keys are ignored.
    pub fn from_args(args: &Map<String, Value>) -> Self {
        let mut config = InjectConfig::default();
        if let Some(raw) = lookup(args, "beforeEachInject", "before_each_inject") {
            config.before_each_inject = coerce_count(raw);
            if !is_plain_count(raw) {
                debug!(?raw, coerced = config.before_each_inject, "coerced beforeEachInject");
            }
        }
        if let Some(raw) = lookup(args, "perInject", "per_inject") {
            config.per_inject = coerce_count(raw);
            if !is_plain_count(raw) {
                debug!(?raw, coerced = config.per_inject, "coerced perInject");
            }
        }
        config
    }

    /// Either count at zero means nothing will ever be injected.
    pub fn is_degenerate(&self) -> bool {
        self.before_each_inject == 0 || self.per_inject == 0
    }
}

fn lookup<'a>(args: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    args.get(camel).or_else(|| args.get(snake))
}

fn is_plain_count(value: &Value) -> bool {
    value.as_u64().is_some()
}

// ============================================================================
// QUERY ARGS
// ============================================================================

/// Parameters for fetching secondary items from a `QuerySource`.
///
/// `post_types` and `posts_per_page` are owned by the planner; everything the
/// caller adds beyond `page` lands in `filters` and is passed through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryArgs {
    #[serde(default, rename = "postType", deserialize_with = "one_or_many")]
    pub post_types: Vec<String>,
    /// `None` asks for every matching item.
    #[serde(default)]
    pub posts_per_page: Option<usize>,
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

fn first_page() -> usize {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

impl Default for QueryArgs {
    fn default() -> Self {
        QueryArgs {
            post_types: Vec::new(),
            posts_per_page: None,
            page: 1,
            filters: Map::new(),
        }
    }
}

impl QueryArgs {
    /// Merge caller query parameters over `{page: default_page}`.
    ///
    /// `page` (or `paged`) from the caller wins over the default; reserved
    /// keys (`postType`, `postsPerPage`) are dropped because the planner sets
    /// them itself. `post_types` is always the planner's list.
    pub fn merged(caller: &Map<String, Value>, default_page: usize, post_types: &[String]) -> Self {
        let mut args = QueryArgs {
            post_types: post_types.to_vec(),
            page: default_page.max(1),
            ..QueryArgs::default()
        };

        for (key, value) in caller {
            match key.as_str() {
                "page" | "paged" => args.page = coerce_count(value).max(1),
                "postType" | "post_type" | "postsPerPage" | "posts_per_page" => {}
                _ => {
                    args.filters.insert(key.clone(), value.clone());
                }
            }
        }
        args
    }

    /// String value of a filter, if present and a string.
    pub fn filter_str(&self, key: &str) -> Option<&str> {
        self.filters.get(key).and_then(Value::as_str)
    }
}
