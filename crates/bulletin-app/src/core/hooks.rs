//! # Hooks and Observers
//!
//! Two registries populated at composition time:
//!
//! - [`SessionResetHooks`]: caches that must forget everything when the
//!   session ends. Fired synchronously before the session slice flips to
//!   logged-out.
//! - [`EventObservers`]: side-effect listeners notified after each event has
//!   been reduced.

use crate::core::events::AppEvent;
use crate::core::reducer::Reducer;
use crate::core::store::SliceStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// A cache that resets when the session ends.
pub trait SessionResetHook: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Drop everything cached for the ended session.
    fn on_session_ended(&self);
}

/// Resets a slice store by reducing a fixed event into it.
pub struct SliceReset<S: Reducer> {
    store: SliceStore<S>,
    event: S::Event,
}

impl<S: Reducer> SliceReset<S> {
    /// Hook that reduces `event` into `store` on session end.
    pub fn new(store: SliceStore<S>, event: S::Event) -> Self {
        Self { store, event }
    }
}

impl<S> SessionResetHook for SliceReset<S>
where
    S: Reducer,
    S::Event: Send + Sync,
{
    fn name(&self) -> &'static str {
        self.store.name()
    }

    fn on_session_ended(&self) {
        self.store.apply(&self.event);
    }
}

/// Registry of session reset hooks. Order between hooks is unspecified.
#[derive(Default)]
pub struct SessionResetHooks {
    hooks: RwLock<Vec<Arc<dyn SessionResetHook>>>,
}

impl SessionResetHooks {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook.
    pub fn register(&self, hook: Arc<dyn SessionResetHook>) {
        tracing::debug!(hook = hook.name(), "registered session reset hook");
        self.hooks.write().push(hook);
    }

    /// Fire every hook. Returns how many ran.
    pub fn fire(&self) -> usize {
        let hooks = self.hooks.read().clone();
        for hook in &hooks {
            tracing::debug!(hook = hook.name(), "resetting cache for ended session");
            hook.on_session_ended();
        }
        hooks.len()
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }
}

/// Listener for reduced application events.
///
/// Observers run synchronously on the dispatching task and must not block;
/// long-running work is spawned.
pub trait EventObserver: Send + Sync {
    /// Called once per event, after the owning slice has reduced it.
    fn observe(&self, event: &AppEvent);
}

/// Registry of event observers.
#[derive(Default)]
pub struct EventObservers {
    observers: RwLock<Vec<Arc<dyn EventObserver>>>,
}

impl EventObservers {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn EventObserver>) {
        self.observers.write().push(observer);
    }

    /// Deliver `event` to every observer.
    pub fn publish(&self, event: &AppEvent) {
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.observe(event);
        }
    }
}
