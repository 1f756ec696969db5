//! Where secondary items come from.
//!
//! The planner never talks to a content store directly. It builds a
//! `QueryArgs` and hands it to a `QuerySource`. Anything that can answer a
//! query implements the trait, including a plain closure, which keeps tests
//! short.
//!
//! `MemorySource` answers queries over an in-memory list of `Post`s and is
//! what the CLI `simulate` command and the benches run against.

use crate::config::QueryArgs;
use crate::types::Post;
use thiserror::Error;
use tracing::debug;

/// Why a fetch produced no items.
///
/// The planner treats every variant like an empty result: the page renders
/// without injected items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("query source unavailable: {0}")]
    Unavailable(String),

    #[error("invalid query arguments: {0}")]
    InvalidArgs(String),
}

/// Answers secondary-item queries.
pub trait QuerySource<T> {
    fn fetch(&self, args: &QueryArgs) -> Result<Vec<T>, FetchError>;
}

impl<T, F> QuerySource<T> for F
where
    F: Fn(&QueryArgs) -> Result<Vec<T>, FetchError>,
{
    fn fetch(&self, args: &QueryArgs) -> Result<Vec<T>, FetchError> {
        self(args)
    }
}

/// Filter keys `MemorySource` understands, besides post types and paging.
const META_KEY: [&str; 2] = ["metaKey", "meta_key"];
const META_VALUE: [&str; 2] = ["metaValue", "meta_value"];

/// In-memory content store.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    posts: Vec<Post>,
}

impl MemorySource {
    pub fn new(posts: Vec<Post>) -> Self {
        MemorySource { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Posts of the given types, in store order.
    pub fn posts_of_type<'a>(&'a self, post_type: &'a str) -> impl Iterator<Item = &'a Post> {
        self.posts.iter().filter(move |post| post.post_type == post_type)
    }

    /// Whether any post of this type exists.
    pub fn has_post_type(&self, post_type: &str) -> bool {
        self.posts_of_type(post_type).next().is_some()
    }

    fn matches(post: &Post, args: &QueryArgs) -> Result<bool, FetchError> {
        if !args.post_types.is_empty() && !args.post_types.iter().any(|t| *t == post.post_type) {
            return Ok(false);
        }

        let meta_key = first_str(args, &META_KEY)?;
        let meta_value = first_str(args, &META_VALUE)?;
        Ok(match (meta_key, meta_value) {
            (Some(key), Some(value)) => post.meta.get(key).is_some_and(|v| v == value),
            (Some(key), None) => post.meta.contains_key(key),
            (None, Some(_)) => {
                return Err(FetchError::InvalidArgs(
                    "metaValue given without metaKey".to_string(),
                ))
            }
            (None, None) => true,
        })
    }
}

fn first_str<'a>(args: &'a QueryArgs, keys: &[&str]) -> Result<Option<&'a str>, FetchError> {
    for key in keys {
        if let Some(value) = args.filters.get(*key) {
            return value
                .as_str()
                .map(Some)
                .ok_or_else(|| FetchError::InvalidArgs(format!("{} must be a string", key)));
        }
    }
    Ok(None)
}

impl QuerySource<Post> for MemorySource {
    fn fetch(&self, args: &QueryArgs) -> Result<Vec<Post>, FetchError> {
        let mut matching = Vec::new();
        for post in &self.posts {
            if Self::matches(post, args)? {
                matching.push(post);
            }
        }

        let page: Vec<Post> = match args.posts_per_page {
            None => matching.into_iter().cloned().collect(),
            Some(per_page) => {
                let skip = args.page.saturating_sub(1).saturating_mul(per_page);
                matching
                    .into_iter()
                    .skip(skip)
                    .take(per_page)
                    .cloned()
                    .collect()
            }
        };

        debug!(
            post_types = ?args.post_types,
            page = args.page,
            per_page = ?args.posts_per_page,
            found = page.len(),
            "memory source fetch"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemorySource {
        MemorySource::new(vec![
            Post::new(1, "post", "One"),
            Post::new(2, "sponsor", "Ad A").with_meta("featured", "1"),
            Post::new(3, "sponsor", "Ad B"),
            Post::new(4, "sponsor", "Ad C").with_meta("featured", "1"),
            Post::new(5, "promo", "Promo"),
        ])
    }

    fn query(types: &[&str]) -> QueryArgs {
        QueryArgs {
            post_types: types.iter().map(|t| t.to_string()).collect(),
            ..QueryArgs::default()
        }
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|post| post.id).collect()
    }

    #[test]
    fn filters_by_post_type() {
        let found = store().fetch(&query(&["sponsor"])).unwrap();
        assert_eq!(ids(&found), vec![2, 3, 4]);

        let found = store().fetch(&query(&["sponsor", "promo"])).unwrap();
        assert_eq!(ids(&found), vec![2, 3, 4, 5]);
    }

    #[test]
    fn pages_results() {
        let mut args = query(&["sponsor"]);
        args.posts_per_page = Some(2);
        assert_eq!(ids(&store().fetch(&args).unwrap()), vec![2, 3]);

        args.page = 2;
        assert_eq!(ids(&store().fetch(&args).unwrap()), vec![4]);

        args.page = 3;
        assert!(store().fetch(&args).unwrap().is_empty());
    }

    #[test]
    fn filters_by_meta() {
        let mut args = query(&["sponsor"]);
        args.filters.insert("meta_key".into(), json!("featured"));
        args.filters.insert("meta_value".into(), json!("1"));
        assert_eq!(ids(&store().fetch(&args).unwrap()), vec![2, 4]);

        args.filters.remove("meta_value");
        assert_eq!(ids(&store().fetch(&args).unwrap()), vec![2, 4]);
    }

    #[test]
    fn rejects_meta_value_without_key() {
        let mut args = query(&["sponsor"]);
        args.filters.insert("metaValue".into(), json!("1"));
        assert!(matches!(
            store().fetch(&args),
            Err(FetchError::InvalidArgs(_))
        ));
    }

    #[test]
    fn closures_are_sources() {
        let source = |_: &QueryArgs| -> Result<Vec<u64>, FetchError> { Ok(vec![7, 8]) };
        assert_eq!(source.fetch(&QueryArgs::default()).unwrap(), vec![7, 8]);
    }

    #[test]
    fn knows_its_post_types() {
        assert!(store().has_post_type("promo"));
        assert!(!store().has_post_type("page"));
    }
}
