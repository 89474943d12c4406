//! Domain entities and identifiers.

mod identifiers;
mod notification;
mod post;

pub use identifiers::{NotificationId, PostId, UserId};
pub use notification::Notification;
pub use post::{NewPost, Post, PostUpdate, ReactionName, Reactions};
