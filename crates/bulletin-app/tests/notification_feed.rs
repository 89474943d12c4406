#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Server notifications feed through `AppCore::dispatch`.

use bulletin_app::{
    AppCore, Intent, IntentOutcome, NotificationSelectors, OperationOutcome, OperationStatus,
};
use bulletin_core::effects::TransportError;
use bulletin_core::{NotificationId, UserId};
use bulletin_effects::FakePostsApi;
use bulletin_testkit::{fixtures, ControllableTimeSource, MockPostsTransport};
use std::sync::Arc;

fn app_with(transport: &Arc<MockPostsTransport>) -> Arc<AppCore> {
    Arc::new(
        AppCore::builder(transport.clone(), Arc::new(ControllableTimeSource::new(0))).build(),
    )
}

fn feed_ids(app: &AppCore) -> Vec<String> {
    app.notification_feed()
        .notifications()
        .ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

#[tokio::test]
async fn test_refresh_merges_and_marks_previous_entries() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_notifications(Ok(vec![fixtures::notification(
        "a",
        "1",
        "2023-01-01T00:00:00.000Z",
    )]));
    transport.push_notifications(Ok(vec![fixtures::notification(
        "b",
        "2",
        "2023-01-02T00:00:00.000Z",
    )]));
    let app = app_with(&transport);

    app.dispatch(Intent::FetchNotifications).await.unwrap();
    let read = app.dispatch(Intent::MarkNotificationsRead).await.unwrap();
    assert_eq!(read, IntentOutcome::Applied { changed: true });
    let outcome = app.dispatch(Intent::FetchNotifications).await.unwrap();

    assert_eq!(outcome, IntentOutcome::Fetch(OperationOutcome::Succeeded));
    assert_eq!(feed_ids(&app), vec!["b", "a"]);
    let feed = app.notification_feed();
    let old = feed.notifications().get(&NotificationId::new("a")).unwrap();
    assert!(old.read && !old.is_new);
    let fresh = feed.notifications().get(&NotificationId::new("b")).unwrap();
    assert!(!fresh.read && fresh.is_new);
    assert_eq!(NotificationSelectors::unread_count(&feed), 1);
}

#[tokio::test]
async fn test_refresh_in_flight_is_skipped() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.hold_fetches();
    let app = app_with(&transport);

    let first = tokio::spawn({
        let app = app.clone();
        async move { app.dispatch(Intent::FetchNotifications).await }
    });
    tokio::task::yield_now().await;
    assert_eq!(app.notification_feed().status(), OperationStatus::Pending);

    let second = app.dispatch(Intent::FetchNotifications).await.unwrap();
    assert_eq!(
        second,
        IntentOutcome::Fetch(OperationOutcome::Skipped {
            status: OperationStatus::Pending
        })
    );

    transport.release_fetch();
    first.await.unwrap().unwrap();
    assert_eq!(transport.notification_requests().len(), 1);
}

#[tokio::test]
async fn test_failed_refresh_keeps_cached_entries() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_notifications(Ok(vec![fixtures::notification(
        "a",
        "1",
        "2023-01-01T00:00:00.000Z",
    )]));
    transport.push_notifications(Err(TransportError::rejected("Network Error")));
    let app = app_with(&transport);

    app.dispatch(Intent::FetchNotifications).await.unwrap();
    let outcome = app.dispatch(Intent::FetchNotifications).await.unwrap();

    assert_eq!(
        outcome,
        IntentOutcome::Fetch(OperationOutcome::Failed {
            message: "Network Error".to_string()
        })
    );
    let feed = app.notification_feed();
    assert_eq!(feed.error(), Some("Network Error"));
    assert_eq!(feed_ids(&app), vec!["a"]);
}

#[tokio::test]
async fn test_created_post_shows_up_in_feed() {
    let time = Arc::new(ControllableTimeSource::new(1_672_531_200_000));
    let server = Arc::new(FakePostsApi::new(time.clone()));
    let app = AppCore::builder(server, time.clone()).build();
    app.dispatch(Intent::Login {
        user_id: UserId::new("1"),
    })
    .await
    .unwrap();

    app.dispatch(Intent::AddNewPost {
        title: "Hello".to_string(),
        content: "World".to_string(),
    })
    .await
    .unwrap();
    app.dispatch(Intent::FetchNotifications).await.unwrap();

    let feed = app.notification_feed();
    assert_eq!(feed.notifications().len(), 1);
    let entry = feed.notifications().iter().next().unwrap();
    assert_eq!(entry.user_id, UserId::new("1"));
    assert_eq!(entry.message, "posted \"Hello\"");

    // Nothing newer on the server, so the next refresh adds nothing.
    app.dispatch(Intent::FetchNotifications).await.unwrap();
    assert_eq!(app.notification_feed().notifications().len(), 1);
}
