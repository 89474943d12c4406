//! Command handlers.

use crate::render::Output;
use anyhow::{bail, Context, Result};
use bulletin_app::{AppConfig, AppCore, Intent, IntentOutcome, OperationOutcome};
use bulletin_core::effects::PostsTransport;
use bulletin_core::{BulletinConfig, PostId, ReactionName, UserId};
use bulletin_effects::{FakePostsApi, HttpPostsTransport, RealTimeHandler};
use std::path::Path;
use std::sync::Arc;

/// Load configuration: defaults or file, then env, then the URL override.
pub fn load_config(path: Option<&Path>, api_url: Option<&str>) -> Result<AppConfig> {
    let mut config = AppConfig::load(path).context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config.api_base_url = url.to_string();
        config.validate().context("Invalid --api-url")?;
    }
    Ok(config)
}

/// Build the app core on the fake server or the HTTP transport.
pub fn build_app(config: AppConfig, remote: bool) -> Result<AppCore> {
    let time = Arc::new(RealTimeHandler::new());
    let transport: Arc<dyn PostsTransport> = if remote {
        tracing::info!(url = %config.api_base_url, "using remote posts API");
        Arc::new(
            HttpPostsTransport::new(config.api_base_url.clone(), config.request_timeout())
                .context("Failed to build HTTP client")?,
        )
    } else {
        Arc::new(FakePostsApi::new(time.clone()).with_sample_posts())
    };
    Ok(AppCore::builder(transport, time).with_config(config).build())
}

async fn login(app: &AppCore, user: &str) -> Result<()> {
    app.dispatch(Intent::Login {
        user_id: UserId::new(user),
    })
    .await?;
    Ok(())
}

async fn fetch_or_fail(app: &AppCore) -> Result<()> {
    match app.dispatch(Intent::FetchPosts).await? {
        IntentOutcome::Fetch(OperationOutcome::Failed { message }) => {
            bail!("Failed to fetch posts: {message}")
        }
        _ => Ok(()),
    }
}

/// `bulletin fetch`
pub async fn fetch(app: &AppCore, output: &Output) -> Result<()> {
    fetch_or_fail(app).await?;
    output.posts(&app.posts(), &app.users())
}

/// `bulletin post`
pub async fn post(
    app: &AppCore,
    output: &Output,
    author: &str,
    title: String,
    content: String,
) -> Result<()> {
    login(app, author).await?;
    fetch_or_fail(app).await?;
    app.dispatch(Intent::AddNewPost { title, content }).await?;
    output.posts(&app.posts(), &app.users())?;
    output.toasts(app.notifications().board())
}

/// `bulletin react`
pub async fn react(
    app: &AppCore,
    output: &Output,
    post_id: PostId,
    reaction: ReactionName,
) -> Result<()> {
    fetch_or_fail(app).await?;
    let outcome = app
        .dispatch(Intent::AddReaction {
            post_id: post_id.clone(),
            reaction,
        })
        .await?;
    if outcome == (IntentOutcome::Applied { changed: false }) {
        bail!("No post with id {post_id}");
    }
    output.posts(&app.posts(), &app.users())
}

async fn refresh_notifications(app: &AppCore) -> Result<()> {
    match app.dispatch(Intent::FetchNotifications).await? {
        IntentOutcome::Fetch(OperationOutcome::Failed { message }) => {
            bail!("Failed to fetch notifications: {message}")
        }
        _ => Ok(()),
    }
}

/// `bulletin notifications`
pub async fn notifications(app: &AppCore, output: &Output, mark_read: bool) -> Result<()> {
    refresh_notifications(app).await?;
    output.notifications(&app.notification_feed(), &app.users())?;
    if mark_read {
        app.dispatch(Intent::MarkNotificationsRead).await?;
    }
    Ok(())
}

/// `bulletin demo`
pub async fn demo(app: &AppCore, output: &Output, wait_for_toast: bool) -> Result<()> {
    login(app, "1").await?;
    fetch_or_fail(app).await?;
    output.posts(&app.posts(), &app.users())?;

    let created = match app
        .dispatch(Intent::AddNewPost {
            title: "Hello from the CLI".to_string(),
            content: "Posted through the headless app core.".to_string(),
        })
        .await?
    {
        IntentOutcome::PostCreated(post) => post,
        other => bail!("Unexpected outcome: {other:?}"),
    };
    output.toasts(app.notifications().board())?;
    refresh_notifications(app).await?;
    output.notifications(&app.notification_feed(), &app.users())?;
    app.dispatch(Intent::MarkNotificationsRead).await?;

    for reaction in [ReactionName::Tada, ReactionName::Rocket, ReactionName::Tada] {
        app.dispatch(Intent::AddReaction {
            post_id: created.id.clone(),
            reaction,
        })
        .await?;
    }
    app.dispatch(Intent::UpdatePost {
        id: PostId::new("2"),
        title: "Second Post (edited)".to_string(),
        content: "More text, now edited".to_string(),
    })
    .await?;
    output.posts(&app.posts(), &app.users())?;

    if wait_for_toast {
        let delay = app.config().notification_delay();
        tracing::info!(?delay, "waiting for toast to expire");
        tokio::time::sleep(delay + std::time::Duration::from_millis(50)).await;
        output.toasts(app.notifications().board())?;
    }

    app.dispatch(Intent::Logout).await?;
    output.posts(&app.posts(), &app.users())
}
