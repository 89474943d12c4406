//! # Bulletin Testkit
//!
//! Deterministic doubles for the effect boundaries of the application core:
//!
//! - [`MockPostsTransport`]: scripted responses, call counters, and a gate
//!   that holds fetches in flight until released
//! - [`ControllableTimeSource`]: a clock tests move by hand
//! - [`fixtures`]: post and notification builders

// Test doubles panic on misuse rather than threading errors through tests.
#![allow(clippy::expect_used, clippy::unwrap_used)]

pub mod fixtures;
mod time;
mod transport;

pub use time::ControllableTimeSource;
pub use transport::MockPostsTransport;
