//! # Workflows
//!
//! Multi-step operations behind each [`Intent`](crate::core::Intent). A
//! workflow reads snapshots from [`AppCore`](crate::core::AppCore), talks to
//! the transport, and reports what happened as slice events; it never
//! mutates state directly.

pub mod notifications;
pub mod posts;
pub mod session;
