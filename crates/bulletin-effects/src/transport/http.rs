//! HTTP transport for the posts API

use super::{NOTIFICATIONS_PATH, POSTS_PATH};
use async_trait::async_trait;
use bulletin_core::effects::{PostsTransport, TransportError};
use bulletin_core::{NewPost, Notification, Post};
use std::time::Duration;

/// `reqwest`-backed transport talking to `{base_url}/fakeApi/posts`.
#[derive(Debug, Clone)]
pub struct HttpPostsTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPostsTransport {
    /// Create a transport for the given base URL with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a transport around an existing client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// Absolute URL of the posts resource.
    pub fn posts_url(&self) -> String {
        format!("{}{}", self.base_url, POSTS_PATH)
    }

    /// Absolute URL of the notifications resource.
    pub fn notifications_url(&self) -> String {
        format!("{}{}", self.base_url, NOTIFICATIONS_PATH)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = body.trim();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: (!message.is_empty()).then(|| message.to_string()),
            });
        }
        response.json::<T>().await.map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

fn connection_error(err: reqwest::Error) -> TransportError {
    TransportError::Connection {
        message: err.to_string(),
    }
}

#[async_trait]
impl PostsTransport for HttpPostsTransport {
    async fn fetch_posts(&self) -> Result<Vec<Post>, TransportError> {
        let url = self.posts_url();
        tracing::debug!(%url, "GET posts");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(connection_error)?;
        Self::decode(response).await
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, TransportError> {
        let url = self.posts_url();
        tracing::debug!(%url, author = %post.author_id, "POST post");
        let response = self
            .client
            .post(&url)
            .json(&post)
            .send()
            .await
            .map_err(connection_error)?;
        Self::decode(response).await
    }

    async fn fetch_notifications(
        &self,
        since: Option<String>,
    ) -> Result<Vec<Notification>, TransportError> {
        let url = self.notifications_url();
        tracing::debug!(%url, ?since, "GET notifications");
        let mut request = self.client.get(&url);
        if let Some(since) = since {
            request = request.query(&[("since", since)]);
        }
        let response = request.send().await.map_err(connection_error)?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_posts_url_trims_trailing_slash() {
        let transport =
            HttpPostsTransport::with_client("http://localhost:3000/", reqwest::Client::new());
        assert_eq!(transport.posts_url(), "http://localhost:3000/fakeApi/posts");
        assert_eq!(
            transport.notifications_url(),
            "http://localhost:3000/fakeApi/notifications"
        );
    }

    /// A loopback port that was just released, so nothing listens on it.
    fn closed_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let url = format!("http://127.0.0.1:{}", closed_port());
        let transport = HttpPostsTransport::new(url, Duration::from_millis(500)).unwrap();
        let err = transport.fetch_posts().await.unwrap_err();
        assert_matches!(err, TransportError::Connection { .. });
        assert!(err.message().is_some());
    }
}
