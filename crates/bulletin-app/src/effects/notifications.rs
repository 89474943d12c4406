//! # Notification Dispatcher
//!
//! Turns successful post creations into transient toasts.
//!
//! For every `PostCreated` event the dispatcher shows a toast right away and
//! spawns a deferred task, keyed by the toast's ticket id, that sleeps for
//! the configured delay and then dismisses it. Each creation gets its own
//! ticket; nothing is coalesced.
//!
//! Faults in the scheduling path (no runtime, a failing clock) are logged and
//! swallowed. They never reach the state slices or the dispatching caller.

use crate::config::AppConfig;
use crate::core::{AppEvent, EventObserver, PostsEvent};
use bulletin_core::effects::PhysicalTimeEffects;
use bulletin_core::Post;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Toasts
// ─────────────────────────────────────────────────────────────────────────────

/// Toast severity level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    /// Neutral information
    #[default]
    Info,
    /// An action completed
    Success,
    /// Something needs attention
    Warning,
    /// An action failed
    Error,
}

impl ToastLevel {
    /// Indicator symbol for this level.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

/// Handle for one scheduled notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationTicket {
    /// Key of the toast and its deferred dismissal
    pub id: Uuid,
    /// When the toast was shown
    pub created_at: Instant,
    /// Lifetime before automatic dismissal
    pub expires_after: Duration,
}

/// A visible toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Ticket keying this toast
    pub ticket: NotificationTicket,
    /// Text shown
    pub message: String,
    /// Severity
    pub level: ToastLevel,
}

/// The set of toasts currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastBoard {
    toasts: Arc<Mutex<IndexMap<Uuid, Toast>>>,
}

impl ToastBoard {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast.
    pub fn show(&self, toast: Toast) {
        self.toasts.lock().insert(toast.ticket.id, toast);
    }

    /// Remove a toast. Dismissing an absent toast is a no-op returning `false`.
    pub fn dismiss(&self, id: &Uuid) -> bool {
        self.toasts.lock().shift_remove(id).is_some()
    }

    /// Whether the toast is still visible.
    pub fn is_active(&self, id: &Uuid) -> bool {
        self.toasts.lock().contains_key(id)
    }

    /// Visible toasts, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.toasts.lock().values().cloned().collect()
    }

    /// Number of visible toasts.
    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    /// Whether nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Shows and expires post-created toasts.
pub struct NotificationDispatcher {
    board: ToastBoard,
    time: Arc<dyn PhysicalTimeEffects>,
    delay: Duration,
    message: String,
    dismissals: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl NotificationDispatcher {
    /// Dispatcher drawing on `board`, sleeping through `time`.
    pub fn new(board: ToastBoard, time: Arc<dyn PhysicalTimeEffects>, config: &AppConfig) -> Self {
        Self {
            board,
            time,
            delay: config.notification_delay(),
            message: config.notification_message.clone(),
            dismissals: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The board toasts are shown on.
    pub fn board(&self) -> &ToastBoard {
        &self.board
    }

    /// Show the post-created toast and schedule its dismissal.
    pub fn notify_post_created(&self, post: &Post) -> NotificationTicket {
        let ticket = NotificationTicket {
            id: Uuid::new_v4(),
            created_at: Instant::now(),
            expires_after: self.delay,
        };
        self.board.show(Toast {
            ticket,
            message: self.message.clone(),
            level: ToastLevel::Success,
        });
        tracing::info!(post_id = %post.id, ticket = %ticket.id, "post created notification shown");
        self.schedule_dismissal(ticket);
        ticket
    }

    /// Abort a pending dismissal and remove its toast now.
    ///
    /// Returns whether anything was still pending or visible.
    pub fn cancel(&self, id: &Uuid) -> bool {
        let pending = self.dismissals.lock().remove(id);
        let aborted = match pending {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        };
        let dismissed = self.board.dismiss(id);
        aborted || dismissed
    }

    /// Number of dismissals still waiting on their delay.
    pub fn pending_dismissals(&self) -> usize {
        self.dismissals
            .lock()
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    fn schedule_dismissal(&self, ticket: NotificationTicket) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(ticket = %ticket.id, error = %e, "no runtime to schedule toast dismissal");
                return;
            }
        };

        let board = self.board.clone();
        let time = self.time.clone();
        let dismissals = self.dismissals.clone();
        let delay_ms = u64::try_from(ticket.expires_after.as_millis()).unwrap_or(u64::MAX);

        // Hold the registry lock across spawn so the task's own removal
        // cannot run before its handle is stored.
        let mut pending = self.dismissals.lock();
        let handle = runtime.spawn(async move {
            if let Err(e) = time.sleep_ms(delay_ms).await {
                tracing::warn!(ticket = %ticket.id, error = %e, "toast delay failed, dismissing early");
            }
            if board.dismiss(&ticket.id) {
                tracing::debug!(ticket = %ticket.id, "toast dismissed");
            }
            dismissals.lock().remove(&ticket.id);
        });
        pending.insert(ticket.id, handle);
    }
}

impl EventObserver for NotificationDispatcher {
    fn observe(&self, event: &AppEvent) {
        if let AppEvent::Posts(PostsEvent::PostCreated(post)) = event {
            self.notify_post_created(post);
        }
    }
}

impl Drop for NotificationDispatcher {
    fn drop(&mut self) {
        for (_, handle) in self.dismissals.lock().drain() {
            handle.abort();
        }
    }
}
