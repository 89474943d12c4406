//! Posts transport boundary.
//!
//! Models the requests the application core issues against the board's
//! API. The core never inspects transport details beyond the optional
//! human-readable message carried by a failure.
//!
//! ```text
//! fetch_posts()      ≙ GET  /fakeApi/posts
//! create_post(body)  ≙ POST /fakeApi/posts
//! fetch_notifications(since) ≙ GET /fakeApi/notifications?since=<date>
//! ```

use crate::types::{NewPost, Notification, Post};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message shown when a failure carries no description of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";

/// Failure reported by the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum TransportError {
    /// The request never produced a response
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection failure
        message: String,
    },

    /// The server answered with a non-success status
    #[error("Request failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Optional server-provided message
        message: Option<String>,
    },

    /// The response body could not be decoded
    #[error("Malformed response: {message}")]
    Decode {
        /// Description of the decode failure
        message: String,
    },

    /// The request was rejected with an optional message and nothing else
    #[error("Request rejected")]
    Rejected {
        /// Optional rejection message
        message: Option<String>,
    },
}

impl TransportError {
    /// Rejection carrying a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Rejection without any message.
    pub fn unknown() -> Self {
        Self::Rejected { message: None }
    }

    /// The failure's own message, if it carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Connection { message } | Self::Decode { message } => Some(message.as_str()),
            Self::Status { message, .. } | Self::Rejected { message } => message.as_deref(),
        }
    }

    /// Message suitable for display, falling back to [`UNKNOWN_ERROR_MESSAGE`].
    pub fn display_message(&self) -> String {
        self.message()
            .filter(|message| !message.is_empty())
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string()
    }
}

/// Request boundary for the posts resource.
#[async_trait]
pub trait PostsTransport: Send + Sync {
    /// Fetch the full, server-ordered list of posts.
    async fn fetch_posts(&self) -> Result<Vec<Post>, TransportError>;

    /// Create a post; the server assigns id, timestamp and zeroed reactions.
    async fn create_post(&self, post: NewPost) -> Result<Post, TransportError>;

    /// Fetch notifications newer than `since` (all of them when `None`).
    async fn fetch_notifications(
        &self,
        since: Option<String>,
    ) -> Result<Vec<Notification>, TransportError>;
}

/// Blanket implementation for Arc<T> where T: PostsTransport
#[async_trait]
impl<T: PostsTransport + ?Sized> PostsTransport for std::sync::Arc<T> {
    async fn fetch_posts(&self) -> Result<Vec<Post>, TransportError> {
        (**self).fetch_posts().await
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, TransportError> {
        (**self).create_post(post).await
    }

    async fn fetch_notifications(
        &self,
        since: Option<String>,
    ) -> Result<Vec<Notification>, TransportError> {
        (**self).fetch_notifications(since).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_message_uses_own_message() {
        let err = TransportError::rejected("Network Error");
        assert_eq!(err.display_message(), "Network Error");
    }

    #[test]
    fn test_display_message_falls_back() {
        assert_eq!(TransportError::unknown().display_message(), "Unknown Error");

        let err = TransportError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.display_message(), UNKNOWN_ERROR_MESSAGE);

        let err = TransportError::Rejected {
            message: Some(String::new()),
        };
        assert_eq!(err.display_message(), UNKNOWN_ERROR_MESSAGE);
    }
}
