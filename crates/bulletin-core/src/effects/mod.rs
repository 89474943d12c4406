//! # Effect Interfaces
//!
//! Pure signatures for the side-effecting capabilities the application core
//! depends on. Production handlers live in `bulletin-effects`; deterministic
//! doubles live in `bulletin-testkit`.
//!
//! - [`PhysicalTimeEffects`]: wall-clock reads and delays
//! - [`PostsTransport`]: the fetch/create request boundary

pub mod time;
pub mod transport;

pub use time::{PhysicalTimeEffects, TimeError};
pub use transport::{PostsTransport, TransportError, UNKNOWN_ERROR_MESSAGE};
