#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! End-to-end behavior of the posts slice through `AppCore::dispatch`.

use assert_matches::assert_matches;
use bulletin_app::{
    AppCore, Intent, IntentError, IntentOutcome, OperationOutcome, OperationStatus,
    PostSelectors,
};
use bulletin_core::effects::TransportError;
use bulletin_core::{PostId, ReactionName, UserId};
use bulletin_testkit::{fixtures, ControllableTimeSource, MockPostsTransport};
use std::sync::Arc;

fn app_with(transport: &Arc<MockPostsTransport>) -> Arc<AppCore> {
    Arc::new(
        AppCore::builder(transport.clone(), Arc::new(ControllableTimeSource::new(0))).build(),
    )
}

fn ids(app: &AppCore) -> Vec<String> {
    app.posts()
        .posts()
        .ids()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

async fn login(app: &AppCore, user: &str) {
    app.dispatch(Intent::Login {
        user_id: UserId::new(user),
    })
    .await
    .unwrap();
}

// ============================================================================
// Fetch lifecycle
// ============================================================================

#[tokio::test]
async fn test_fetch_orders_newest_first() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Ok(vec![
        fixtures::post("2", "2023-01-01T00:00:00.000Z"),
        fixtures::post("1", "2023-01-02T00:00:00.000Z"),
    ]));
    let app = app_with(&transport);

    let outcome = app.dispatch(Intent::FetchPosts).await.unwrap();

    assert_eq!(outcome, IntentOutcome::Fetch(OperationOutcome::Succeeded));
    assert_eq!(app.posts().status(), OperationStatus::Succeeded);
    assert_eq!(ids(&app), vec!["1", "2"]);
}

#[tokio::test]
async fn test_fetch_failure_records_message() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Err(TransportError::rejected("Network Error")));
    let app = app_with(&transport);

    let outcome = app.dispatch(Intent::FetchPosts).await.unwrap();

    assert_matches!(
        outcome,
        IntentOutcome::Fetch(OperationOutcome::Failed { ref message }) if message == "Network Error"
    );
    let posts = app.posts();
    assert_eq!(posts.status(), OperationStatus::Failed);
    assert_eq!(posts.error(), Some("Network Error"));
    assert!(posts.posts().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_without_message_is_unknown_error() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Err(TransportError::unknown()));
    let app = app_with(&transport);

    app.dispatch(Intent::FetchPosts).await.unwrap();

    assert_eq!(app.posts().error(), Some("Unknown Error"));
}

#[tokio::test]
async fn test_fetch_runs_once_per_session() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Ok(fixtures::dated_pair()));
    let app = app_with(&transport);

    app.dispatch(Intent::FetchPosts).await.unwrap();
    let again = app.dispatch(Intent::FetchPosts).await.unwrap();

    assert_eq!(
        again,
        IntentOutcome::Fetch(OperationOutcome::Skipped {
            status: OperationStatus::Succeeded
        })
    );
    assert_eq!(transport.fetch_calls(), 1);
}

#[tokio::test]
async fn test_concurrent_fetch_makes_one_request() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.hold_fetches();
    transport.push_fetch(Ok(fixtures::dated_pair()));
    let app = app_with(&transport);

    let first = tokio::spawn({
        let app = app.clone();
        async move { app.dispatch(Intent::FetchPosts).await }
    });
    tokio::task::yield_now().await;
    assert_eq!(app.posts().status(), OperationStatus::Pending);

    let second = app.dispatch(Intent::FetchPosts).await.unwrap();
    assert_eq!(
        second,
        IntentOutcome::Fetch(OperationOutcome::Skipped {
            status: OperationStatus::Pending
        })
    );

    transport.release_fetch();
    assert_eq!(
        first.await.unwrap().unwrap(),
        IntentOutcome::Fetch(OperationOutcome::Succeeded)
    );
    assert_eq!(transport.fetch_calls(), 1);
    assert_eq!(ids(&app), vec!["1", "2"]);
}

#[tokio::test]
async fn test_fetch_burst_yields_single_success() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.hold_fetches();
    transport.push_fetch(Ok(fixtures::dated_pair()));
    let app = app_with(&transport);

    let burst = futures::future::join_all((0..5).map(|_| app.dispatch(Intent::FetchPosts)));
    let release = async {
        tokio::task::yield_now().await;
        transport.release_fetch();
    };
    let (outcomes, ()) = futures::join!(burst, release);

    let succeeded = outcomes
        .iter()
        .filter(|o| **o == Ok(IntentOutcome::Fetch(OperationOutcome::Succeeded)))
        .count();
    assert_eq!(succeeded, 1);
    assert_eq!(transport.fetch_calls(), 1);
    assert_eq!(app.posts().status(), OperationStatus::Succeeded);
}

#[tokio::test]
async fn test_reaction_during_pending_fetch_survives() {
    let transport = Arc::new(MockPostsTransport::new());
    let app = app_with(&transport);
    login(&app, "0").await;

    // Seed the cache with a post the server will return again.
    transport.push_create(Ok(fixtures::post("1", "2023-01-02T00:00:00.000Z")));
    app.dispatch(Intent::AddNewPost {
        title: "Post 1".to_string(),
        content: "Content of post 1".to_string(),
    })
    .await
    .unwrap();

    transport.hold_fetches();
    transport.push_fetch(Ok(fixtures::dated_pair()));
    let fetch = tokio::spawn({
        let app = app.clone();
        async move { app.dispatch(Intent::FetchPosts).await }
    });
    tokio::task::yield_now().await;

    let outcome = app
        .dispatch(Intent::AddReaction {
            post_id: PostId::new("1"),
            reaction: ReactionName::Rocket,
        })
        .await
        .unwrap();
    assert_eq!(outcome, IntentOutcome::Applied { changed: true });

    transport.release_fetch();
    fetch.await.unwrap().unwrap();

    let posts = app.posts();
    assert_eq!(ids(&app), vec!["1", "2"]);
    assert_eq!(
        posts.get(&PostId::new("1")).map(|p| p.reactions.rocket),
        Some(1)
    );
}

// ============================================================================
// Create / edit / react
// ============================================================================

#[tokio::test]
async fn test_created_post_merges_into_order() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Ok(fixtures::dated_pair()));
    transport.push_create(Ok(fixtures::post_by("3", "1", "2023-01-03T00:00:00.000Z")));
    let app = app_with(&transport);
    login(&app, "1").await;
    app.dispatch(Intent::FetchPosts).await.unwrap();

    let outcome = app
        .dispatch(Intent::AddNewPost {
            title: "Hello".to_string(),
            content: "World".to_string(),
        })
        .await
        .unwrap();

    assert_matches!(outcome, IntentOutcome::PostCreated(ref post) if post.id == PostId::new("3"));
    assert_eq!(ids(&app), vec!["3", "1", "2"]);
    assert_eq!(transport.create_requests()[0].author_id, UserId::new("1"));
}

#[tokio::test]
async fn test_create_failure_leaves_cache_untouched() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Ok(fixtures::dated_pair()));
    transport.push_create(Err(TransportError::rejected("Network Error")));
    let app = app_with(&transport);
    login(&app, "0").await;
    app.dispatch(Intent::FetchPosts).await.unwrap();
    let before = app.posts();

    let err = app
        .dispatch(Intent::AddNewPost {
            title: "t".to_string(),
            content: "c".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        IntentError::Transport {
            message: "Network Error".to_string()
        }
    );
    assert!(Arc::ptr_eq(&before, &app.posts()));
    assert!(app.notifications().board().is_empty());
}

#[tokio::test]
async fn test_update_and_react_on_cached_post() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Ok(fixtures::dated_pair()));
    let app = app_with(&transport);
    app.dispatch(Intent::FetchPosts).await.unwrap();

    app.dispatch(Intent::UpdatePost {
        id: PostId::new("2"),
        title: "Edited".to_string(),
        content: "New body".to_string(),
    })
    .await
    .unwrap();
    for _ in 0..3 {
        app.dispatch(Intent::AddReaction {
            post_id: PostId::new("2"),
            reaction: ReactionName::ThumbsUp,
        })
        .await
        .unwrap();
    }

    let posts = app.posts();
    let post = posts.get(&PostId::new("2")).unwrap();
    assert_eq!(post.title, "Edited");
    assert_eq!(post.content, "New body");
    assert_eq!(post.created_at, "2023-01-01T00:00:00.000Z");
    assert_eq!(post.reactions.thumbs_up, 3);
    assert_eq!(post.reactions.total(), 3);
}

#[tokio::test]
async fn test_edit_of_missing_post_changes_nothing() {
    let transport = Arc::new(MockPostsTransport::new());
    let app = app_with(&transport);
    let mut sub = app.subscribe_posts();

    let outcome = app
        .dispatch(Intent::AddReaction {
            post_id: PostId::new("zzz"),
            reaction: ReactionName::Eyes,
        })
        .await
        .unwrap();

    assert_eq!(outcome, IntentOutcome::Applied { changed: false });
    assert!(sub.poll().is_none());
}

// ============================================================================
// Subscriptions and selectors
// ============================================================================

#[tokio::test]
async fn test_subscription_sees_fetch_result() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Ok(fixtures::dated_pair()));
    let app = app_with(&transport);
    let mut sub = app.subscribe_posts();

    app.dispatch(Intent::FetchPosts).await.unwrap();

    let latest = sub.poll().unwrap();
    assert_eq!(latest.status(), OperationStatus::Succeeded);
    assert_eq!(latest.posts().len(), 2);
}

#[tokio::test]
async fn test_selectors_recompute_only_on_change() {
    let transport = Arc::new(MockPostsTransport::new());
    transport.push_fetch(Ok(fixtures::dated_pair()));
    let app = app_with(&transport);
    let selectors = PostSelectors::new();
    app.dispatch(Intent::FetchPosts).await.unwrap();

    selectors.all_posts(&app.posts());
    selectors.all_posts(&app.posts());
    assert_eq!(selectors.recomputations(), 1);

    // A no-op edit publishes nothing, so the memo still hits.
    app.dispatch(Intent::AddReaction {
        post_id: PostId::new("zzz"),
        reaction: ReactionName::Tada,
    })
    .await
    .unwrap();
    selectors.all_posts(&app.posts());
    assert_eq!(selectors.recomputations(), 1);

    app.dispatch(Intent::AddReaction {
        post_id: PostId::new("1"),
        reaction: ReactionName::Tada,
    })
    .await
    .unwrap();
    let all = selectors.all_posts(&app.posts());
    assert_eq!(selectors.recomputations(), 2);
    assert_eq!(all[0].reactions.tada, 1);
}
