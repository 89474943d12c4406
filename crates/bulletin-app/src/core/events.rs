//! # Events
//!
//! Closed event sets for each slice. Reducers match them exhaustively, so a
//! new variant is a compile error until every slice decides what it means.

use crate::core::lifecycle::LifecycleEvent;
use bulletin_core::{Notification, Post, PostId, PostUpdate, ReactionName, UserId};

/// Events reduced by the posts slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostsEvent {
    /// Lifecycle of the posts fetch
    Fetch(LifecycleEvent<Vec<Post>>),
    /// A create request succeeded with the server's post
    PostCreated(Post),
    /// A create request failed; carries the display message
    CreateRejected {
        /// Failure message
        message: String,
    },
    /// Local edit of title and content
    PostUpdated(PostUpdate),
    /// Local reaction increment
    ReactionAdded {
        /// Target post
        post_id: PostId,
        /// Counter to increment
        reaction: ReactionName,
    },
    /// The session ended; return to the initial state
    SessionReset,
}

/// Events reduced by the notifications slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationsEvent {
    /// Lifecycle of a notifications refresh; the payload holds only new
    /// entries
    Fetch(LifecycleEvent<Vec<Notification>>),
    /// The user viewed the list; every cached notification is now read
    AllRead,
    /// The session ended; return to the initial state
    SessionReset,
}

/// Events reduced by the session slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A user logged in
    LoggedIn {
        /// The user
        user_id: UserId,
    },
    /// The session ended
    LoggedOut,
}

/// Any event the application core publishes to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Posts slice event
    Posts(PostsEvent),
    /// Notifications slice event
    Notifications(NotificationsEvent),
    /// Session slice event
    Session(SessionEvent),
}

impl From<PostsEvent> for AppEvent {
    fn from(event: PostsEvent) -> Self {
        Self::Posts(event)
    }
}

impl From<NotificationsEvent> for AppEvent {
    fn from(event: NotificationsEvent) -> Self {
        Self::Notifications(event)
    }
}

impl From<SessionEvent> for AppEvent {
    fn from(event: SessionEvent) -> Self {
        Self::Session(event)
    }
}
