//! Scripted board transport

use async_trait::async_trait;
use bulletin_core::effects::{PostsTransport, TransportError};
use bulletin_core::{NewPost, Notification, Post, PostId, Reactions};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Date given to posts synthesized by an unscripted create.
pub const SYNTHESIZED_POST_DATE: &str = "2099-01-01T00:00:00.000Z";

#[derive(Default)]
struct Script {
    fetches: VecDeque<Result<Vec<Post>, TransportError>>,
    creates: VecDeque<Result<Post, TransportError>>,
    create_requests: Vec<NewPost>,
    notifications: VecDeque<Result<Vec<Notification>, TransportError>>,
    notification_since: Vec<Option<String>>,
}

/// Posts transport answering from a script.
///
/// - fetches pop the next scripted response, or return an empty list
/// - creates pop the next scripted response, or echo the request back as a
///   post with id `mock-N` and [`SYNTHESIZED_POST_DATE`]
/// - notification fetches pop the next scripted response, or return an
///   empty list; the `since` argument of each is recorded
/// - [`hold_fetches`](Self::hold_fetches) parks every fetch (posts and
///   notifications) until
///   [`release_fetch`](Self::release_fetch) is called, to test in-flight
///   behavior
#[derive(Default)]
pub struct MockPostsTransport {
    script: Mutex<Script>,
    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockPostsTransport {
    /// Transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fetch response.
    pub fn push_fetch(&self, response: Result<Vec<Post>, TransportError>) {
        self.script.lock().fetches.push_back(response);
    }

    /// Queue a create response.
    pub fn push_create(&self, response: Result<Post, TransportError>) {
        self.script.lock().creates.push_back(response);
    }

    /// Queue a notifications response.
    pub fn push_notifications(&self, response: Result<Vec<Notification>, TransportError>) {
        self.script.lock().notifications.push_back(response);
    }

    /// `since` argument of every notifications request, in order.
    pub fn notification_requests(&self) -> Vec<Option<String>> {
        self.script.lock().notification_since.clone()
    }

    /// Park fetches until released.
    pub fn hold_fetches(&self) {
        *self.gate.lock() = Some(Arc::new(Notify::new()));
    }

    /// Let one parked (or the next) fetch through.
    pub fn release_fetch(&self) {
        if let Some(gate) = self.gate.lock().as_ref() {
            gate.notify_one();
        }
    }

    /// Number of fetch requests received.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of create requests received.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Bodies of every create request, in order.
    pub fn create_requests(&self) -> Vec<NewPost> {
        self.script.lock().create_requests.clone()
    }

    async fn pass_gate(&self) {
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl PostsTransport for MockPostsTransport {
    async fn fetch_posts(&self) -> Result<Vec<Post>, TransportError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        self.script
            .lock()
            .fetches
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, TransportError> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let mut script = self.script.lock();
        script.create_requests.push(post.clone());
        script.creates.pop_front().unwrap_or_else(|| {
            Ok(Post {
                id: PostId::new(format!("mock-{n}")),
                title: post.title,
                content: post.content,
                author_id: post.author_id,
                created_at: SYNTHESIZED_POST_DATE.to_string(),
                reactions: Reactions::default(),
            })
        })
    }

    async fn fetch_notifications(
        &self,
        since: Option<String>,
    ) -> Result<Vec<Notification>, TransportError> {
        self.script.lock().notification_since.push(since);
        self.pass_gate().await;
        self.script
            .lock()
            .notifications
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
