#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Behavior of the in-process board server.

use assert_matches::assert_matches;
use bulletin_core::effects::{PostsTransport, TransportError};
use bulletin_core::{NewPost, Notification, NotificationId, Reactions, UserId};
use bulletin_effects::{FakePostsApi, RealTimeHandler};
use std::sync::Arc;
use std::time::Duration;

fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: "body".to_string(),
        author_id: UserId::new("1"),
    }
}

#[tokio::test]
async fn test_fetch_returns_seeded_posts() {
    let api = FakePostsApi::new(Arc::new(RealTimeHandler::new())).with_sample_posts();
    let posts = api.fetch_posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "First Post!");
}

#[tokio::test]
async fn test_create_assigns_id_date_and_zero_reactions() {
    let api = FakePostsApi::new(Arc::new(RealTimeHandler::new()));
    let first = api.create_post(new_post("a")).await.unwrap();
    let second = api.create_post(new_post("b")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.reactions, Reactions::default());
    assert_eq!(first.author_id, UserId::new("1"));
    assert!(first.created_at.ends_with('Z'));
    assert!(first.created_at <= second.created_at);
    assert_eq!(api.stored_posts().len(), 2);
}

#[tokio::test]
async fn test_injected_failure_applies_once() {
    let api = FakePostsApi::new(Arc::new(RealTimeHandler::new())).with_sample_posts();
    api.fail_next(TransportError::rejected("Network Error"));

    let err = api.fetch_posts().await.unwrap_err();
    assert_matches!(err, TransportError::Rejected { message: Some(ref m) } if m == "Network Error");

    assert_eq!(api.fetch_posts().await.unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_latency_uses_clock() {
    let api = FakePostsApi::new(Arc::new(RealTimeHandler::new())).with_latency_ms(500);
    let start = tokio::time::Instant::now();
    api.fetch_posts().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn test_created_post_raises_notification_newer_than_since() {
    let seeded = Notification {
        id: NotificationId::new("n0"),
        user_id: UserId::new("2"),
        message: "says hi".to_string(),
        created_at: "2023-01-01T00:00:00.000Z".to_string(),
        read: false,
        is_new: true,
    };
    let api = FakePostsApi::new(Arc::new(RealTimeHandler::new())).with_notifications([seeded]);
    let post = api.create_post(new_post("Hello")).await.unwrap();

    let all = api.fetch_notifications(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].user_id, UserId::new("1"));
    assert_eq!(all[0].message, "posted \"Hello\"");
    assert_eq!(all[0].created_at, post.created_at);
    assert_eq!(all[1].id, NotificationId::new("n0"));

    let newer = api
        .fetch_notifications(Some("2023-01-01T00:00:00.000Z".to_string()))
        .await
        .unwrap();
    assert_eq!(newer.len(), 1);
    assert!(api
        .fetch_notifications(Some(post.created_at))
        .await
        .unwrap()
        .is_empty());
}
