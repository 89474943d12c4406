//! Configuration contract shared by Bulletin configuration types.

mod traits;

pub use traits::BulletinConfig;
