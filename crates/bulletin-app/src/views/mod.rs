//! # Views
//!
//! State slices owned by the application core. Each slice is published as an
//! immutable snapshot through its store; reducers in [`crate::core::reducer`]
//! are the only writers.

mod collection;
mod notifications;
mod posts;
mod session;
mod users;

pub use collection::{Comparator, Entity, EntityCollection};
pub use notifications::NotificationsState;
pub use posts::PostsState;
pub(crate) use posts::LocalEdit;
pub use session::SessionState;
pub use users::{User, UsersState};
