//! # Selectors
//!
//! Read-only views for the rendering layer.
//!
//! Cheap projections (`post_by_id`, `status`, ...) borrow straight from the
//! snapshot. Derived lists are memoized: they recompute only when handed a
//! different snapshot `Arc` (or a different argument) than last time. Since
//! slice stores publish a new `Arc` only when the state actually changed,
//! pointer identity is a sound cache key.

use crate::core::lifecycle::OperationStatus;
use crate::views::{NotificationsState, PostsState, SessionState, User, UsersState};
use bulletin_core::{Notification, Post, PostId, UserId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Compares snapshots by allocation rather than by value.
struct SnapshotKey<T>(Arc<T>);

impl<T> PartialEq for SnapshotKey<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Single-entry memo cache.
struct Memo<K, V> {
    last: Mutex<Option<(K, Arc<V>)>>,
    recomputations: AtomicU64,
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            last: Mutex::new(None),
            recomputations: AtomicU64::new(0),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        let mut last = self.last.lock();
        if let Some((cached_key, value)) = last.as_ref() {
            if *cached_key == key {
                return value.clone();
            }
        }
        let value = Arc::new(compute());
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *last = Some((key, value.clone()));
        value
    }

    fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}

/// Memoized views over the posts slice.
#[derive(Default)]
pub struct PostSelectors {
    all: Memo<SnapshotKey<PostsState>, Vec<Post>>,
    by_author: Memo<(SnapshotKey<Vec<Post>>, UserId), Vec<Post>>,
}

impl PostSelectors {
    /// Fresh selectors with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cached post, newest first.
    pub fn all_posts(&self, state: &Arc<PostsState>) -> Arc<Vec<Post>> {
        self.all.get_or_compute(SnapshotKey(state.clone()), || {
            state.posts().iter().cloned().collect()
        })
    }

    /// Posts written by `author`, newest first.
    pub fn posts_by_author(&self, state: &Arc<PostsState>, author: &UserId) -> Arc<Vec<Post>> {
        let all = self.all_posts(state);
        self.by_author
            .get_or_compute((SnapshotKey(all.clone()), author.clone()), || {
                all.iter()
                    .filter(|post| &post.author_id == author)
                    .cloned()
                    .collect()
            })
    }

    /// One post by id.
    pub fn post_by_id<'a>(state: &'a PostsState, id: &PostId) -> Option<&'a Post> {
        state.get(id)
    }

    /// Post ids, newest first.
    pub fn post_ids(state: &PostsState) -> &[PostId] {
        state.posts().ids()
    }

    /// Fetch status.
    pub fn status(state: &PostsState) -> OperationStatus {
        state.status()
    }

    /// Last fetch error.
    pub fn error(state: &PostsState) -> Option<&str> {
        state.error()
    }

    /// How many times a derived list was rebuilt.
    pub fn recomputations(&self) -> u64 {
        self.all.recomputations() + self.by_author.recomputations()
    }
}

/// Memoized views over the server notifications slice.
#[derive(Default)]
pub struct NotificationSelectors {
    all: Memo<SnapshotKey<NotificationsState>, Vec<Notification>>,
}

impl NotificationSelectors {
    /// Fresh selectors with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cached notification, newest first.
    pub fn all_notifications(&self, state: &Arc<NotificationsState>) -> Arc<Vec<Notification>> {
        self.all.get_or_compute(SnapshotKey(state.clone()), || {
            state.notifications().iter().cloned().collect()
        })
    }

    /// Notifications not yet marked read.
    pub fn unread_count(state: &NotificationsState) -> usize {
        state.unread_count()
    }

    /// How many times the list was rebuilt.
    pub fn recomputations(&self) -> u64 {
        self.all.recomputations()
    }
}

/// Views over the users and session slices.
pub struct UserSelectors;

impl UserSelectors {
    /// Every known user.
    pub fn all_users(users: &UsersState) -> &[User] {
        users.all()
    }

    /// One user by id.
    pub fn user_by_id<'a>(users: &'a UsersState, id: &UserId) -> Option<&'a User> {
        users.get(id)
    }

    /// The logged-in user.
    pub fn current_user<'a>(users: &'a UsersState, session: &SessionState) -> Option<&'a User> {
        session.current_user().and_then(|id| users.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reducer::Reducer;
    use crate::core::{LifecycleEvent, NotificationsEvent, PostsEvent, RequestId, SessionEvent};
    use bulletin_core::Reactions;

    fn post(id: &str, author: &str, date: &str) -> Post {
        Post {
            id: PostId::new(id),
            title: "t".to_string(),
            content: "c".to_string(),
            author_id: UserId::new(author),
            created_at: date.to_string(),
            reactions: Reactions::default(),
        }
    }

    fn loaded() -> Arc<PostsState> {
        let mut state = PostsState::default();
        let request = RequestId::new();
        state.reduce(&PostsEvent::Fetch(LifecycleEvent::Started { request }));
        state.reduce(&PostsEvent::Fetch(LifecycleEvent::Fulfilled {
            request,
            payload: vec![
                post("1", "0", "2023-01-01T00:00:00Z"),
                post("2", "2", "2023-01-02T00:00:00Z"),
                post("3", "0", "2023-01-03T00:00:00Z"),
            ],
        }));
        Arc::new(state)
    }

    #[test]
    fn test_all_posts_memoized_on_snapshot() {
        let selectors = PostSelectors::new();
        let state = loaded();

        let first = selectors.all_posts(&state);
        let second = selectors.all_posts(&state);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(selectors.recomputations(), 1);

        let equal_but_new = Arc::new(PostsState::clone(&state));
        selectors.all_posts(&equal_but_new);
        assert_eq!(selectors.recomputations(), 2);
    }

    #[test]
    fn test_posts_by_author() {
        let selectors = PostSelectors::new();
        let state = loaded();

        let andy = selectors.posts_by_author(&state, &UserId::new("0"));
        let ids: Vec<&str> = andy.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);

        let again = selectors.posts_by_author(&state, &UserId::new("0"));
        assert!(Arc::ptr_eq(&andy, &again));

        let ben = selectors.posts_by_author(&state, &UserId::new("2"));
        assert_eq!(ben.len(), 1);
    }

    #[test]
    fn test_plain_projections() {
        let state = loaded();
        assert_eq!(
            PostSelectors::post_ids(&state)
                .iter()
                .map(PostId::as_str)
                .collect::<Vec<_>>(),
            vec!["3", "2", "1"]
        );
        assert!(PostSelectors::post_by_id(&state, &PostId::new("2")).is_some());
        assert!(PostSelectors::post_by_id(&state, &PostId::new("9")).is_none());
        assert_eq!(PostSelectors::status(&state), OperationStatus::Succeeded);
        assert_eq!(PostSelectors::error(&state), None);
    }

    #[test]
    fn test_notifications_memoized_until_marked_read() {
        let selectors = NotificationSelectors::new();
        let mut state = NotificationsState::default();
        let request = RequestId::new();
        state.reduce(&NotificationsEvent::Fetch(LifecycleEvent::Started { request }));
        state.reduce(&NotificationsEvent::Fetch(LifecycleEvent::Fulfilled {
            request,
            payload: vec![Notification {
                id: bulletin_core::NotificationId::new("n1"),
                user_id: UserId::new("1"),
                message: "says hi".to_string(),
                created_at: "2023-01-01T00:00:00Z".to_string(),
                read: false,
                is_new: true,
            }],
        }));
        let state = Arc::new(state);

        selectors.all_notifications(&state);
        selectors.all_notifications(&state);
        assert_eq!(selectors.recomputations(), 1);
        assert_eq!(NotificationSelectors::unread_count(&state), 1);

        let mut read = NotificationsState::clone(&state);
        read.reduce(&NotificationsEvent::AllRead);
        let read = Arc::new(read);
        assert!(selectors.all_notifications(&read)[0].read);
        assert_eq!(selectors.recomputations(), 2);
        assert_eq!(NotificationSelectors::unread_count(&read), 0);
    }

    #[test]
    fn test_current_user() {
        let users = UsersState::seeded();
        let mut session = SessionState::default();
        assert!(UserSelectors::current_user(&users, &session).is_none());

        session.reduce(&SessionEvent::LoggedIn {
            user_id: UserId::new("2"),
        });
        assert_eq!(
            UserSelectors::current_user(&users, &session).map(|u| u.name.as_str()),
            Some("Ben Gifford")
        );
        assert_eq!(UserSelectors::all_users(&users).len(), 3);
        assert!(UserSelectors::user_by_id(&users, &UserId::new("1")).is_some());
    }
}
