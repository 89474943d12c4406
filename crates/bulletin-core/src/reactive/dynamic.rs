//! Versioned snapshot cell.
//!
//! A slice store keeps its current state here as an `Arc` snapshot. Each
//! publication bumps a version number stored under the same lock as the
//! value, so a reader never pairs a value with another publication's version.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct Published<T> {
    version: u64,
    value: T,
}

/// The latest published value of `T`, shared by every clone.
///
/// `T` is meant to be cheap to clone (typically `Arc<State>`): reads hand out
/// a clone of the current snapshot and never block a publication for longer
/// than that clone.
#[derive(Clone)]
pub struct Dynamic<T> {
    cell: Arc<RwLock<Published<T>>>,
}

impl<T: Clone> Dynamic<T> {
    /// Cell holding `value` at version 0.
    pub fn new(value: T) -> Self {
        Self {
            cell: Arc::new(RwLock::new(Published { version: 0, value })),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> T {
        self.cell.read().value.clone()
    }

    /// Number of publications so far.
    pub fn version(&self) -> u64 {
        self.cell.read().version
    }

    /// Publish `value` as the new snapshot.
    pub fn set(&self, value: T) {
        let mut published = self.cell.write();
        published.version += 1;
        published.value = value;
    }

    /// Follow later publications. Nothing published before this call is
    /// reported.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            cell: self.cell.clone(),
            seen: self.version(),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let published = self.cell.read();
        f.debug_struct("Dynamic")
            .field("version", &published.version)
            .field("value", &published.value)
            .finish()
    }
}

/// Polling handle onto a [`Dynamic`].
///
/// Publications between two polls collapse into the newest snapshot.
pub struct Subscription<T> {
    cell: Arc<RwLock<Published<T>>>,
    seen: u64,
}

impl<T: Clone> Subscription<T> {
    /// The newest snapshot if anything was published since the last poll.
    pub fn poll(&mut self) -> Option<T> {
        let published = self.cell.read();
        if published.version == self.seen {
            return None;
        }
        self.seen = published.version;
        Some(published.value.clone())
    }
}
