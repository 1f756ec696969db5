//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::hooks::InjectHooks;
use crate::interleave::Interleaver;
use crate::types::Post;
use std::cell::RefCell;

/// Create a post of type `"post"` titled after its id.
///
/// This is the canonical implementation used across all tests.
pub fn make_post(id: u64) -> Post {
    Post::new(id, "post", &format!("Post {}", id))
}

/// Create a sponsored post titled after its id.
pub fn make_sponsor(id: u64) -> Post {
    Post::new(id, "sponsor", &format!("Sponsor {}", id))
}

/// `count` primary posts with ids `1..=count`.
pub fn make_posts(count: u64) -> Vec<Post> {
    (1..=count).map(make_post).collect()
}

/// `count` sponsored posts with ids `start..start + count`.
pub fn make_sponsors(start: u64, count: u64) -> Vec<Post> {
    (start..start + count).map(make_sponsor).collect()
}

/// Ids of a post list, in order.
pub fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|post| post.id).collect()
}

/// Hook that records every call it receives as a short string.
///
/// `before <secondary> <primary>`, `after <merged> <secondary>`,
/// `post <merged> <injected>`.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub events: RefCell<Vec<String>>,
}

impl RecordingHooks {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl<T> InjectHooks<T> for RecordingHooks {
    fn before_inject(&self, _: &Interleaver<T>, secondary: &[T], primary: &[T]) {
        self.events
            .borrow_mut()
            .push(format!("before {} {}", secondary.len(), primary.len()));
    }

    fn after_inject(&self, _: &Interleaver<T>, merged: &[T], secondary: &[T]) {
        self.events
            .borrow_mut()
            .push(format!("after {} {}", merged.len(), secondary.len()));
    }

    fn post_process(&self, merged: Vec<T>, injected: bool, _: &Interleaver<T>, _: &[T]) -> Vec<T> {
        self.events
            .borrow_mut()
            .push(format!("post {} {}", merged.len(), injected));
        merged
    }
}
