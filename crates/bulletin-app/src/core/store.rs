//! # Slice Store
//!
//! Single-writer container for one state slice.
//!
//! Each event is reduced against a private copy of the current snapshot; the
//! copy is published only when it differs from the snapshot it replaced, so a
//! no-op event leaves the version (and every `Arc` held by readers) as is.

use crate::core::reducer::Reducer;
use bulletin_core::reactive::{Dynamic, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

/// Published state for one slice plus the lock that serializes its writers.
#[derive(Clone)]
pub struct SliceStore<S: Reducer> {
    name: &'static str,
    state: Dynamic<Arc<S>>,
    writer: Arc<Mutex<()>>,
}

impl<S: Reducer> SliceStore<S> {
    /// Create a store publishing `initial`.
    pub fn new(name: &'static str, initial: S) -> Self {
        Self {
            name,
            state: Dynamic::new(Arc::new(initial)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Slice name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<S> {
        self.state.get()
    }

    /// Number of published changes.
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Observe published snapshots.
    pub fn subscribe(&self) -> Subscription<Arc<S>> {
        self.state.subscribe()
    }

    /// Reduce `event` into the slice. Returns whether the state changed.
    pub fn apply(&self, event: &S::Event) -> bool {
        let _writer = self.writer.lock();
        self.reduce_locked(event)
    }

    /// Reduce `event` only if `guard` accepts the current state.
    ///
    /// The check and the reduction happen under the same writer lock, so no
    /// other event can land between them. Returns whether the guard passed.
    pub fn apply_if(&self, guard: impl FnOnce(&S) -> bool, event: &S::Event) -> bool {
        let _writer = self.writer.lock();
        if !guard(&self.state.get()) {
            return false;
        }
        self.reduce_locked(event);
        true
    }

    fn reduce_locked(&self, event: &S::Event) -> bool {
        let current = self.state.get();
        let mut next = S::clone(&current);
        next.reduce(event);
        let changed = next != *current;
        if changed {
            self.state.set(Arc::new(next));
        }
        tracing::trace!(slice = self.name, ?event, changed, "reduced event");
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug)]
    enum CounterEvent {
        Add(u32),
    }

    impl Reducer for Counter {
        type Event = CounterEvent;

        fn reduce(&mut self, event: &CounterEvent) {
            match event {
                CounterEvent::Add(n) => self.value += n,
            }
        }
    }

    #[test]
    fn test_apply_publishes_changes() {
        let store = SliceStore::new("counter", Counter::default());
        let mut sub = store.subscribe();

        assert!(store.apply(&CounterEvent::Add(2)));
        assert_eq!(store.snapshot().value, 2);
        assert_eq!(sub.poll().map(|s| s.value), Some(2));
    }

    #[test]
    fn test_noop_event_keeps_snapshot() {
        let store = SliceStore::new("counter", Counter::default());
        let before = store.snapshot();

        assert!(!store.apply(&CounterEvent::Add(0)));
        assert_eq!(store.version(), 0);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_apply_if_respects_guard() {
        let store = SliceStore::new("counter", Counter::default());

        assert!(store.apply_if(|s| s.value == 0, &CounterEvent::Add(1)));
        assert!(!store.apply_if(|s| s.value == 0, &CounterEvent::Add(1)));
        assert_eq!(store.snapshot().value, 1);
    }
}
