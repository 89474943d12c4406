//! Notifications slice state.

use super::collection::EntityCollection;
use crate::core::lifecycle::{OperationStatus, RequestId};
use bulletin_core::{Notification, NotificationId};
use serde::Serialize;

/// Cached notifications plus the status of the last refresh.
///
/// Unlike posts, notifications refresh repeatedly; each refresh asks only for
/// entries newer than [`latest_timestamp`](Self::latest_timestamp).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationsState {
    pub(crate) notifications: EntityCollection<NotificationId, Notification>,
    pub(crate) status: OperationStatus,
    pub(crate) error: Option<String>,
    #[serde(skip)]
    pub(crate) in_flight: Option<RequestId>,
}

impl Default for NotificationsState {
    fn default() -> Self {
        Self {
            notifications: EntityCollection::new(Notification::newest_first),
            status: OperationStatus::Idle,
            error: None,
            in_flight: None,
        }
    }
}

impl NotificationsState {
    /// Cached notifications, newest first.
    pub fn notifications(&self) -> &EntityCollection<NotificationId, Notification> {
        &self.notifications
    }

    /// Status of the last refresh.
    pub fn status(&self) -> OperationStatus {
        self.status
    }

    /// The refresh currently awaited, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Message of the last failed refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of notifications not yet marked read.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Timestamp of the newest cached notification.
    pub fn latest_timestamp(&self) -> Option<&str> {
        self.notifications
            .iter()
            .next()
            .map(|n| n.created_at.as_str())
    }
}
