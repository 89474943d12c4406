//! # Bulletin App - Headless Application Core
//!
//! Client-side state for the Bulletin posts board: a normalized, ordered
//! cache of server posts, the lifecycle of the request that fills it, local
//! edits, a refreshable feed of server notifications, and the toasts raised
//! when a post is created.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌───────────┐   ┌─────────────┐
//! │  Intent  │──▶│ Workflow  │──▶│   Event   │──▶│ SliceStore  │──▶ snapshots
//! └──────────┘   └───────────┘   └───────────┘   └─────────────┘
//!                      │                │
//!                      ▼                ▼
//!               PostsTransport    EventObservers ──▶ NotificationDispatcher
//! ```
//!
//! - [`core`]: `AppCore`, intents, events, reducers, stores, lifecycle
//! - [`views`]: state slices and the ordered [`views::EntityCollection`]
//! - [`selectors`]: memoized read views for renderers
//! - [`effects`]: toast notifications
//! - [`workflows`]: the logic behind each intent
//! - [`config`]: [`AppConfig`]

#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod effects;
pub mod selectors;
pub mod views;
pub mod workflows;

pub use crate::config::AppConfig;
pub use crate::core::{
    AppCore, AppCoreBuilder, AppEvent, Intent, IntentError, IntentOutcome, NotificationsEvent,
    OperationOutcome, OperationStatus, PostsEvent, SessionEvent,
};
pub use crate::effects::{NotificationDispatcher, NotificationTicket, Toast, ToastBoard, ToastLevel};
pub use crate::selectors::{NotificationSelectors, PostSelectors, UserSelectors};
pub use crate::views::{
    EntityCollection, NotificationsState, PostsState, SessionState, User, UsersState,
};
