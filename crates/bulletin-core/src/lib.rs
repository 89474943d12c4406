//! Bulletin Core - Shared Foundation
//!
//! This crate provides the domain types and effect interfaces shared by the
//! Bulletin application core, its effect handlers and its test doubles. It
//! contains no runtime wiring.
//!
//! # Layout
//!
//! - [`types`]: `Post`, `Reactions`, `ReactionName` and identifier newtypes
//! - [`effects`]: `PhysicalTimeEffects` and `PostsTransport` (the network boundary)
//! - [`reactive`]: `Dynamic<T>` versioned values with polling subscriptions
//! - [`config`]: the `BulletinConfig` loading/validation contract
//! - [`errors`]: the unified [`BulletinError`] type

#![forbid(unsafe_code)]

/// Configuration loading and validation contract
pub mod config;

/// Effect interfaces (no implementations)
pub mod effects;

/// Unified error handling
pub mod errors;

/// Reactive primitives for state publication
pub mod reactive;

/// Physical time values
pub mod time;

/// Domain entities and identifiers
pub mod types;

pub use config::BulletinConfig;
pub use errors::{BulletinError, Result};
pub use time::PhysicalTime;
pub use types::{
    NewPost, Notification, NotificationId, Post, PostId, PostUpdate, ReactionName, Reactions,
    UserId,
};
