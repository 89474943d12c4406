//! # Intents: User Actions
//!
//! An intent is a user action dispatched through [`AppCore::dispatch`]. Each
//! intent runs one workflow, which turns it into slice events.
//!
//! ```text
//! Intent → Workflow → Event → Reduce → Snapshot → Observers
//! ```
//!
//! [`AppCore::dispatch`]: crate::core::AppCore::dispatch

use crate::core::lifecycle::OperationOutcome;
use bulletin_core::{Post, PostId, ReactionName, UserId};
use serde::{Deserialize, Serialize};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    // =========================================================================
    // Posts
    // =========================================================================
    /// Load the posts list, once per session
    FetchPosts,
    /// Create a post authored by the current user
    AddNewPost {
        /// Title
        title: String,
        /// Body text
        content: String,
    },
    /// Edit a cached post's title and content
    UpdatePost {
        /// Target post
        id: PostId,
        /// Replacement title
        title: String,
        /// Replacement body text
        content: String,
    },
    /// Add one reaction to a cached post
    AddReaction {
        /// Target post
        post_id: PostId,
        /// Reaction to add
        reaction: ReactionName,
    },

    // =========================================================================
    // Notifications
    // =========================================================================
    /// Fetch notifications newer than the newest cached one
    FetchNotifications,
    /// Mark every cached notification read
    MarkNotificationsRead,

    // =========================================================================
    // Session
    // =========================================================================
    /// Log in as a roster user
    Login {
        /// The user
        user_id: UserId,
    },
    /// End the session and reset every cache
    Logout,
}

impl Intent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchPosts => "posts/fetchPosts",
            Self::AddNewPost { .. } => "posts/addNewPost",
            Self::UpdatePost { .. } => "posts/postUpdated",
            Self::AddReaction { .. } => "posts/reactionAdded",
            Self::FetchNotifications => "notifications/fetchNotifications",
            Self::MarkNotificationsRead => "notifications/allNotificationsRead",
            Self::Login { .. } => "auth/login",
            Self::Logout => "auth/logout",
        }
    }
}

/// Result of a successfully dispatched intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentOutcome {
    /// Posts or notifications fetch lifecycle result
    Fetch(OperationOutcome),
    /// The server accepted a new post
    PostCreated(Post),
    /// A local edit was reduced; `changed` is false when it left the cache
    /// as it was
    Applied {
        /// Whether the cache changed
        changed: bool,
    },
    /// Login recorded
    LoggedIn,
    /// Session ended after resetting `caches_reset` caches
    LoggedOut {
        /// Number of reset hooks fired
        caches_reset: usize,
    },
}
