//! # Reactive Primitives
//!
//! [`Dynamic<T>`] holds the latest published snapshot of a value;
//! [`Subscription<T>`] polls it for publications it has not seen yet.
//!
//! ```rust,ignore
//! use bulletin_core::reactive::Dynamic;
//!
//! let counter = Dynamic::new(0);
//! let mut sub = counter.subscribe();
//! counter.set(1);
//! assert_eq!(sub.poll(), Some(1));
//! ```

mod dynamic;

pub use dynamic::{Dynamic, Subscription};
