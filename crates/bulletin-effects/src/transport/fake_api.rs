//! In-process board server
//!
//! Serves the same contract as the `/fakeApi/posts` and
//! `/fakeApi/notifications` endpoints without a network: ids are random
//! UUIDs, timestamps come from the injected clock, new posts start with
//! zeroed reactions and each one raises a notification about its author. Used by the CLI's offline mode
//! and by integration tests that want realistic server behavior.

use async_trait::async_trait;
use bulletin_core::effects::{PhysicalTimeEffects, PostsTransport, TransportError};
use bulletin_core::{NewPost, Notification, NotificationId, Post, PostId, Reactions, UserId};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default)]
struct ServerState {
    posts: Vec<Post>,
    notifications: Vec<Notification>,
    /// Failure returned by the next request, then cleared.
    next_failure: Option<TransportError>,
}

/// In-memory implementation of the board API.
#[derive(Clone)]
pub struct FakePostsApi {
    state: Arc<Mutex<ServerState>>,
    time: Arc<dyn PhysicalTimeEffects>,
    latency_ms: u64,
}

impl FakePostsApi {
    /// Create an empty server using the given clock.
    pub fn new(time: Arc<dyn PhysicalTimeEffects>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ServerState::default())),
            time,
            latency_ms: 0,
        }
    }

    /// Simulate network latency on every request.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Seed the server with posts.
    pub fn with_posts(self, posts: impl IntoIterator<Item = Post>) -> Self {
        self.state.lock().posts.extend(posts);
        self
    }

    /// Seed the server with the two starter posts of the demo board.
    pub fn with_sample_posts(self) -> Self {
        self.with_posts([
            Post {
                id: PostId::new("1"),
                title: "First Post!".to_string(),
                content: "Hello!".to_string(),
                author_id: UserId::new("0"),
                created_at: "2023-01-01T10:00:00.000Z".to_string(),
                reactions: Reactions::default(),
            },
            Post {
                id: PostId::new("2"),
                title: "Second Post".to_string(),
                content: "More text".to_string(),
                author_id: UserId::new("2"),
                created_at: "2023-01-01T10:05:00.000Z".to_string(),
                reactions: Reactions::default(),
            },
        ])
    }

    /// Seed the server with notifications.
    pub fn with_notifications(self, notifications: impl IntoIterator<Item = Notification>) -> Self {
        self.state.lock().notifications.extend(notifications);
        self
    }

    /// Make the next request fail with `error`.
    pub fn fail_next(&self, error: TransportError) {
        self.state.lock().next_failure = Some(error);
    }

    /// Posts currently stored on the server.
    pub fn stored_posts(&self) -> Vec<Post> {
        self.state.lock().posts.clone()
    }

    /// Notifications currently stored on the server.
    pub fn stored_notifications(&self) -> Vec<Notification> {
        self.state.lock().notifications.clone()
    }

    async fn simulate_latency(&self) -> Result<(), TransportError> {
        if self.latency_ms == 0 {
            return Ok(());
        }
        self.time
            .sleep_ms(self.latency_ms)
            .await
            .map_err(|e| TransportError::Connection {
                message: e.to_string(),
            })
    }

    fn take_failure(&self) -> Option<TransportError> {
        self.state.lock().next_failure.take()
    }
}

#[async_trait]
impl PostsTransport for FakePostsApi {
    async fn fetch_posts(&self) -> Result<Vec<Post>, TransportError> {
        self.simulate_latency().await?;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.state.lock().posts.clone())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, TransportError> {
        self.simulate_latency().await?;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let now = self
            .time
            .physical_time()
            .await
            .map_err(|e| TransportError::rejected(e.to_string()))?;
        let created = Post {
            id: PostId::new(Uuid::new_v4().to_string()),
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            created_at: now.to_rfc3339(),
            reactions: Reactions::default(),
        };
        tracing::debug!(post_id = %created.id, "fake api stored post");
        let notification = Notification {
            id: NotificationId::new(Uuid::new_v4().to_string()),
            user_id: created.author_id.clone(),
            message: format!("posted \"{}\"", created.title),
            created_at: created.created_at.clone(),
            read: false,
            is_new: true,
        };
        let mut state = self.state.lock();
        state.posts.push(created.clone());
        state.notifications.push(notification);
        Ok(created)
    }

    async fn fetch_notifications(
        &self,
        since: Option<String>,
    ) -> Result<Vec<Notification>, TransportError> {
        self.simulate_latency().await?;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut newer: Vec<Notification> = self
            .state
            .lock()
            .notifications
            .iter()
            .filter(|n| since.as_deref().map_or(true, |since| n.created_at.as_str() > since))
            .cloned()
            .collect();
        newer.sort_by(Notification::newest_first);
        Ok(newer)
    }
}
