//! # Reducers
//!
//! Pure state transitions for each slice:
//! ```text
//! Intent → Workflow → Event → [Reduce] → Snapshot → Observers
//! ```
//!
//! Reducers are total. Events that reference a post the cache does not hold
//! are ignored rather than reported.
//!
//! ## Edits during a fetch
//!
//! A successful fetch replaces the cached posts wholesale. Local edits that
//! landed while the fetch was pending would be lost by that replacement, so
//! the posts reducer logs them and replays them onto the fetched set. A post
//! created during the fetch is re-inserted only if the server result does not
//! already contain it. The log is dropped when the fetch settles or the
//! session resets.
//!
//! ## Late results
//!
//! A fetch result is folded in only if its request is the one the slice is
//! waiting on. After a session reset the slice waits on nothing, so a fetch
//! issued by the ended session cannot refill the cache. The same rule holds
//! for notification refreshes.
//!
//! ## Notifications
//!
//! A refresh merges new entries instead of replacing the list. Entries that
//! were already cached stay `is_new` only while unread; fetched entries
//! arrive unread and new.

use crate::core::events::{NotificationsEvent, PostsEvent, SessionEvent};
use crate::core::lifecycle::{LifecycleEvent, OperationStatus, RequestId};
use crate::views::{LocalEdit, NotificationsState, PostsState, SessionState};
use bulletin_core::{Notification, Post, PostId, PostUpdate, ReactionName};
use std::fmt;

/// A state slice that evolves by reducing events.
pub trait Reducer: Clone + PartialEq + Send + Sync + 'static {
    /// Closed set of events the slice understands.
    type Event: fmt::Debug;

    /// Apply one event in place.
    fn reduce(&mut self, event: &Self::Event);
}

// ============================================================================
// Posts
// ============================================================================

impl Reducer for PostsState {
    type Event = PostsEvent;

    fn reduce(&mut self, event: &PostsEvent) {
        match event {
            PostsEvent::Fetch(LifecycleEvent::Started { request }) => fetch_started(self, *request),
            PostsEvent::Fetch(LifecycleEvent::Fulfilled { request, payload }) => {
                if awaiting("posts", self.in_flight, *request) {
                    fetch_succeeded(self, payload);
                }
            }
            PostsEvent::Fetch(LifecycleEvent::Rejected { request, message }) => {
                if awaiting("posts", self.in_flight, *request) {
                    fetch_failed(self, message);
                }
            }
            PostsEvent::PostCreated(post) => post_created(self, post),
            // The cache only reflects server-confirmed posts.
            PostsEvent::CreateRejected { .. } => {}
            PostsEvent::PostUpdated(update) => post_updated(self, update),
            PostsEvent::ReactionAdded { post_id, reaction } => {
                reaction_added(self, post_id, *reaction);
            }
            PostsEvent::SessionReset => *self = PostsState::default(),
        }
    }
}

fn awaiting(slice: &'static str, in_flight: Option<RequestId>, request: RequestId) -> bool {
    let current = in_flight == Some(request);
    if !current {
        tracing::debug!(slice, %request, "ignoring stale fetch result");
    }
    current
}

fn fetch_started(state: &mut PostsState, request: RequestId) {
    state.status = OperationStatus::Pending;
    state.in_flight = Some(request);
    state.error = None;
    state.in_flight_edits.clear();
}

fn fetch_succeeded(state: &mut PostsState, posts: &[Post]) {
    state.status = OperationStatus::Succeeded;
    state.in_flight = None;
    state.posts.upsert_all(posts.iter().cloned());

    for edit in std::mem::take(&mut state.in_flight_edits) {
        match edit {
            LocalEdit::Reaction { post_id, reaction } => {
                apply_reaction(state, &post_id, reaction);
            }
            LocalEdit::Update(update) => {
                apply_update(state, &update);
            }
            LocalEdit::Created(post) => {
                if !state.posts.contains(&post.id) {
                    state.posts.upsert_one(post);
                }
            }
        }
    }
}

fn fetch_failed(state: &mut PostsState, message: &str) {
    state.status = OperationStatus::Failed;
    state.in_flight = None;
    state.error = Some(message.to_string());
    state.in_flight_edits.clear();
}

fn post_created(state: &mut PostsState, post: &Post) {
    state.posts.upsert_one(post.clone());
    record_if_pending(state, || LocalEdit::Created(post.clone()));
}

fn post_updated(state: &mut PostsState, update: &PostUpdate) {
    if apply_update(state, update) {
        record_if_pending(state, || LocalEdit::Update(update.clone()));
    }
}

fn reaction_added(state: &mut PostsState, post_id: &PostId, reaction: ReactionName) {
    if apply_reaction(state, post_id, reaction) {
        record_if_pending(state, || LocalEdit::Reaction {
            post_id: post_id.clone(),
            reaction,
        });
    }
}

fn apply_update(state: &mut PostsState, update: &PostUpdate) -> bool {
    state.posts.patch_one(&update.id, |post| {
        post.title.clone_from(&update.title);
        post.content.clone_from(&update.content);
    })
}

fn apply_reaction(state: &mut PostsState, post_id: &PostId, reaction: ReactionName) -> bool {
    state
        .posts
        .patch_one(post_id, |post| post.reactions.increment(reaction))
}

fn record_if_pending(state: &mut PostsState, edit: impl FnOnce() -> LocalEdit) {
    if state.status == OperationStatus::Pending {
        state.in_flight_edits.push(edit());
    }
}

// ============================================================================
// Notifications
// ============================================================================

impl Reducer for NotificationsState {
    type Event = NotificationsEvent;

    fn reduce(&mut self, event: &NotificationsEvent) {
        match event {
            NotificationsEvent::Fetch(LifecycleEvent::Started { request }) => {
                self.status = OperationStatus::Pending;
                self.in_flight = Some(*request);
                self.error = None;
            }
            NotificationsEvent::Fetch(LifecycleEvent::Fulfilled { request, payload }) => {
                if awaiting("notifications", self.in_flight, *request) {
                    notifications_received(self, payload);
                }
            }
            NotificationsEvent::Fetch(LifecycleEvent::Rejected { request, message }) => {
                if awaiting("notifications", self.in_flight, *request) {
                    self.status = OperationStatus::Failed;
                    self.in_flight = None;
                    self.error = Some(message.clone());
                }
            }
            NotificationsEvent::AllRead => self.notifications.patch_all(|n| n.read = true),
            NotificationsEvent::SessionReset => *self = NotificationsState::default(),
        }
    }
}

fn notifications_received(state: &mut NotificationsState, fetched: &[Notification]) {
    state.status = OperationStatus::Succeeded;
    state.in_flight = None;
    state.notifications.patch_all(|n| n.is_new = !n.read);
    state
        .notifications
        .upsert_many(fetched.iter().cloned().map(|mut n| {
            n.read = false;
            n.is_new = true;
            n
        }));
}

// ============================================================================
// Session
// ============================================================================

impl Reducer for SessionState {
    type Event = SessionEvent;

    fn reduce(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::LoggedIn { user_id } => self.current_user = Some(user_id.clone()),
            SessionEvent::LoggedOut => self.current_user = None,
        }
    }
}
