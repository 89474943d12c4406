//! # Bulletin Effects
//!
//! Stateless (or self-contained) handlers for the effect traits declared in
//! `bulletin-core`:
//!
//! - [`RealTimeHandler`]: system clock + tokio timers
//! - [`HttpPostsTransport`]: `reqwest` client for the `/fakeApi/posts` endpoints
//! - [`FakePostsApi`]: in-process posts server for offline and demo runs

#![forbid(unsafe_code)]

pub mod time;
pub mod transport;

pub use time::RealTimeHandler;
pub use transport::{FakePostsApi, HttpPostsTransport};
