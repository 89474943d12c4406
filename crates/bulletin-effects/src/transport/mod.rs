//! Board API transport handlers.

mod fake_api;
mod http;

pub use fake_api::FakePostsApi;
pub use http::HttpPostsTransport;

/// Path of the posts resource, relative to the API base URL.
pub const POSTS_PATH: &str = "/fakeApi/posts";

/// Path of the notifications resource, relative to the API base URL.
pub const NOTIFICATIONS_PATH: &str = "/fakeApi/notifications";
