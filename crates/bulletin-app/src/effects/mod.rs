//! # Side Effects
//!
//! Effects the application core drives off reduced events. They observe
//! state transitions and never write to the slices.

mod notifications;

pub use notifications::{NotificationDispatcher, NotificationTicket, Toast, ToastBoard, ToastLevel};
