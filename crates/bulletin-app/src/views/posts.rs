//! Posts slice state.

use super::collection::EntityCollection;
use crate::core::lifecycle::{OperationStatus, RequestId};
use bulletin_core::{Post, PostId, PostUpdate, ReactionName};
use serde::Serialize;

/// A local edit applied while a fetch was in flight.
///
/// Recorded so the edit can be replayed on top of the fetched snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LocalEdit {
    Reaction {
        post_id: PostId,
        reaction: ReactionName,
    },
    Update(PostUpdate),
    Created(Post),
}

/// Cached posts plus the status of the fetch operation that fills them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostsState {
    pub(crate) posts: EntityCollection<PostId, Post>,
    pub(crate) status: OperationStatus,
    pub(crate) error: Option<String>,
    #[serde(skip)]
    pub(crate) in_flight: Option<RequestId>,
    #[serde(skip)]
    pub(crate) in_flight_edits: Vec<LocalEdit>,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            posts: EntityCollection::new(Post::newest_first),
            status: OperationStatus::Idle,
            error: None,
            in_flight: None,
            in_flight_edits: Vec::new(),
        }
    }
}

impl PostsState {
    /// Empty cache, fetch idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached posts, newest first.
    pub fn posts(&self) -> &EntityCollection<PostId, Post> {
        &self.posts
    }

    /// Status of the posts fetch.
    pub fn status(&self) -> OperationStatus {
        self.status
    }

    /// The fetch request currently awaited, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Message of the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Look up one post.
    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.get(id)
    }
}
