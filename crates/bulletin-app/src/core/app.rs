//! # AppCore
//!
//! Composition root of the application core. Owns the slice stores (posts,
//! notifications, session), the
//! transport and clock effects, the reset hook and observer registries, and
//! the notification dispatcher.
//!
//! There are no ambient singletons: hosts build an `AppCore` once through
//! [`AppCoreBuilder`] and share it by `Arc`. All methods take `&self`; each
//! slice store serializes its own writers.
//!
//! ```rust,ignore
//! let app = AppCore::builder(transport, time).with_config(config).build();
//! app.dispatch(Intent::Login { user_id: "0".into() }).await?;
//! app.dispatch(Intent::FetchPosts).await?;
//! let posts = app.posts();
//! ```

use crate::config::AppConfig;
use crate::core::events::{AppEvent, NotificationsEvent, PostsEvent};
use crate::core::hooks::{
    EventObserver, EventObservers, SessionResetHook, SessionResetHooks, SliceReset,
};
use crate::core::intent::{Intent, IntentOutcome};
use crate::core::store::SliceStore;
use crate::core::IntentError;
use crate::effects::{NotificationDispatcher, ToastBoard};
use crate::views::{NotificationsState, PostsState, SessionState, UsersState};
use crate::workflows::{notifications, posts, session};
use bulletin_core::effects::{PhysicalTimeEffects, PostsTransport};
use bulletin_core::reactive::Subscription;
use bulletin_core::PostUpdate;
use std::sync::Arc;

/// The application core.
pub struct AppCore {
    config: AppConfig,
    posts: SliceStore<PostsState>,
    feed: SliceStore<NotificationsState>,
    session: SliceStore<SessionState>,
    users: Arc<UsersState>,
    transport: Arc<dyn PostsTransport>,
    reset_hooks: SessionResetHooks,
    observers: EventObservers,
    notifications: Arc<NotificationDispatcher>,
}

impl AppCore {
    /// Start building an app core around the given effects.
    pub fn builder(
        transport: Arc<dyn PostsTransport>,
        time: Arc<dyn PhysicalTimeEffects>,
    ) -> AppCoreBuilder {
        AppCoreBuilder::new(transport, time)
    }

    // ─── Dispatch ────────────────────────────────────────────

    /// Run the workflow behind `intent`.
    pub async fn dispatch(&self, intent: Intent) -> Result<IntentOutcome, IntentError> {
        tracing::debug!(intent = intent.name(), "dispatching intent");
        match intent {
            Intent::FetchPosts => Ok(IntentOutcome::Fetch(posts::fetch_posts(self).await)),
            Intent::AddNewPost { title, content } => posts::add_new_post(self, &title, &content)
                .await
                .map(IntentOutcome::PostCreated),
            Intent::UpdatePost { id, title, content } => Ok(IntentOutcome::Applied {
                changed: posts::update_post(self, PostUpdate { id, title, content }),
            }),
            Intent::AddReaction { post_id, reaction } => Ok(IntentOutcome::Applied {
                changed: posts::add_reaction(self, post_id, reaction),
            }),
            Intent::FetchNotifications => Ok(IntentOutcome::Fetch(
                notifications::fetch_notifications(self).await,
            )),
            Intent::MarkNotificationsRead => Ok(IntentOutcome::Applied {
                changed: notifications::mark_all_read(self),
            }),
            Intent::Login { user_id } => {
                session::login(self, user_id).map(|()| IntentOutcome::LoggedIn)
            }
            Intent::Logout => Ok(IntentOutcome::LoggedOut {
                caches_reset: session::logout(self),
            }),
        }
    }

    /// Reduce `event` into its slice, then notify observers.
    ///
    /// Returns whether the slice changed. Observers are notified either way.
    pub fn apply(&self, event: AppEvent) -> bool {
        let changed = match &event {
            AppEvent::Posts(event) => self.posts.apply(event),
            AppEvent::Notifications(event) => self.feed.apply(event),
            AppEvent::Session(event) => self.session.apply(event),
        };
        self.publish(&event);
        changed
    }

    pub(crate) fn publish(&self, event: &AppEvent) {
        self.observers.publish(event);
    }

    // ─── State ───────────────────────────────────────────────

    /// Current posts snapshot.
    pub fn posts(&self) -> Arc<PostsState> {
        self.posts.snapshot()
    }

    /// Observe posts snapshots.
    pub fn subscribe_posts(&self) -> Subscription<Arc<PostsState>> {
        self.posts.subscribe()
    }

    /// Current server notifications snapshot.
    ///
    /// Not to be confused with [`notifications`](Self::notifications), the
    /// toast dispatcher.
    pub fn notification_feed(&self) -> Arc<NotificationsState> {
        self.feed.snapshot()
    }

    /// Observe server notifications snapshots.
    pub fn subscribe_notification_feed(&self) -> Subscription<Arc<NotificationsState>> {
        self.feed.subscribe()
    }

    /// Current session snapshot.
    pub fn session(&self) -> Arc<SessionState> {
        self.session.snapshot()
    }

    /// Observe session snapshots.
    pub fn subscribe_session(&self) -> Subscription<Arc<SessionState>> {
        self.session.subscribe()
    }

    /// The user roster.
    pub fn users(&self) -> Arc<UsersState> {
        self.users.clone()
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The notification dispatcher.
    pub fn notifications(&self) -> &Arc<NotificationDispatcher> {
        &self.notifications
    }

    // ─── Registration ────────────────────────────────────────

    /// Register another cache to reset on logout.
    pub fn register_reset_hook(&self, hook: Arc<dyn SessionResetHook>) {
        self.reset_hooks.register(hook);
    }

    /// Register another event observer.
    pub fn register_observer(&self, observer: Arc<dyn EventObserver>) {
        self.observers.register(observer);
    }

    // ─── Internals for workflows ─────────────────────────────

    pub(crate) fn posts_store(&self) -> &SliceStore<PostsState> {
        &self.posts
    }

    pub(crate) fn notifications_store(&self) -> &SliceStore<NotificationsState> {
        &self.feed
    }

    pub(crate) fn transport(&self) -> &Arc<dyn PostsTransport> {
        &self.transport
    }

    pub(crate) fn reset_hooks(&self) -> &SessionResetHooks {
        &self.reset_hooks
    }
}

/// Builder for [`AppCore`].
pub struct AppCoreBuilder {
    config: AppConfig,
    transport: Arc<dyn PostsTransport>,
    time: Arc<dyn PhysicalTimeEffects>,
    users: UsersState,
    board: ToastBoard,
    observers: Vec<Arc<dyn EventObserver>>,
    reset_hooks: Vec<Arc<dyn SessionResetHook>>,
}

impl AppCoreBuilder {
    fn new(transport: Arc<dyn PostsTransport>, time: Arc<dyn PhysicalTimeEffects>) -> Self {
        Self {
            config: AppConfig::default(),
            transport,
            time,
            users: UsersState::seeded(),
            board: ToastBoard::new(),
            observers: Vec::new(),
            reset_hooks: Vec::new(),
        }
    }

    /// Use `config` instead of the defaults.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the seeded user roster.
    pub fn with_users(mut self, users: UsersState) -> Self {
        self.users = users;
        self
    }

    /// Show toasts on a board the host already holds.
    pub fn with_toast_board(mut self, board: ToastBoard) -> Self {
        self.board = board;
        self
    }

    /// Add an event observer.
    pub fn with_observer(mut self, observer: Arc<dyn EventObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Add a session reset hook.
    pub fn with_reset_hook(mut self, hook: Arc<dyn SessionResetHook>) -> Self {
        self.reset_hooks.push(hook);
        self
    }

    /// Wire everything together.
    pub fn build(self) -> AppCore {
        let posts = SliceStore::new("posts", PostsState::default());
        let feed = SliceStore::new("notifications", NotificationsState::default());
        let session = SliceStore::new("session", SessionState::default());

        let reset_hooks = SessionResetHooks::new();
        reset_hooks.register(Arc::new(SliceReset::new(
            posts.clone(),
            PostsEvent::SessionReset,
        )));
        reset_hooks.register(Arc::new(SliceReset::new(
            feed.clone(),
            NotificationsEvent::SessionReset,
        )));
        for hook in self.reset_hooks {
            reset_hooks.register(hook);
        }

        let notifications = Arc::new(NotificationDispatcher::new(
            self.board,
            self.time,
            &self.config,
        ));
        let observers = EventObservers::new();
        observers.register(notifications.clone());
        for observer in self.observers {
            observers.register(observer);
        }

        tracing::debug!(
            api_base_url = %self.config.api_base_url,
            reset_hooks = reset_hooks.len(),
            "app core built"
        );

        AppCore {
            config: self.config,
            posts,
            feed,
            session,
            users: Arc::new(self.users),
            transport: self.transport,
            reset_hooks,
            observers,
            notifications,
        }
    }
}
