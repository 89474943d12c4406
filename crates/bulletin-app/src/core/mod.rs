//! # Core Application Module
//!
//! - [`AppCore`]: the composition root and intent dispatcher
//! - [`Intent`]: user actions
//! - [`PostsEvent`] / [`NotificationsEvent`] / [`SessionEvent`]: closed
//!   per-slice event sets
//! - [`Reducer`]: pure state transitions
//! - [`SliceStore`]: single-writer snapshot publication
//! - [`OperationTracker`]: guarded async request lifecycle
//! - [`SessionResetHooks`] / [`EventObserver`]: cross-slice fan-out
//! - [`IntentError`]: intent dispatch failures

mod app;
mod error;
mod events;
mod hooks;
mod intent;
pub mod lifecycle;
pub mod reducer;
mod store;

pub use app::{AppCore, AppCoreBuilder};
pub use error::IntentError;
pub use events::{AppEvent, NotificationsEvent, PostsEvent, SessionEvent};
pub use hooks::{
    EventObserver, EventObservers, SessionResetHook, SessionResetHooks, SliceReset,
};
pub use intent::{Intent, IntentOutcome};
pub use lifecycle::{
    LifecycleEvent, OperationOutcome, OperationStatus, OperationTracker, RequestId,
};
pub use reducer::Reducer;
pub use store::SliceStore;
