//! Posts Workflow - fetch, create, edit and react
//!
//! Each workflow turns one user action into posts-slice events. Only the
//! fetch and create workflows suspend; both suspend solely on the transport.

use crate::core::{AppCore, AppEvent, IntentError, OperationOutcome, OperationTracker, PostsEvent};
use crate::views::PostsState;
use bulletin_core::{NewPost, Post, PostId, PostUpdate, ReactionName};

/// Load the posts list.
///
/// Runs at most once per session: unless the fetch status is idle this
/// returns [`OperationOutcome::Skipped`] without touching the transport. A
/// rejection is recorded on the slice, not returned as an error.
pub async fn fetch_posts(app: &AppCore) -> OperationOutcome {
    let tracker = OperationTracker::new(
        "posts/fetchPosts",
        app.posts_store(),
        PostsState::status,
        PostsState::in_flight,
        PostsEvent::Fetch,
    );
    let transport = app.transport().clone();
    let outcome = tracker
        .run(
            || async move { transport.fetch_posts().await },
            |event| app.publish(&AppEvent::Posts(event.clone())),
        )
        .await;

    match &outcome {
        OperationOutcome::Succeeded => {
            tracing::info!(count = app.posts().posts().len(), "posts fetched");
        }
        OperationOutcome::Failed { message } => {
            tracing::info!(%message, "posts fetch failed");
        }
        OperationOutcome::Discarded => {
            tracing::info!("posts fetch settled after session reset, result dropped");
        }
        OperationOutcome::Skipped { .. } => {}
    }
    outcome
}

/// Create a post authored by the logged-in user.
///
/// On success the server's post is merged into the cache at its sorted
/// position and observers see `PostCreated`. On failure the cache is left
/// as is and the caller gets [`IntentError::Transport`].
pub async fn add_new_post(app: &AppCore, title: &str, content: &str) -> Result<Post, IntentError> {
    let author_id = app
        .session()
        .current_user()
        .cloned()
        .ok_or(IntentError::Unauthenticated)?;

    if title.trim().is_empty() {
        return Err(IntentError::validation("title", "must not be empty"));
    }
    if content.trim().is_empty() {
        return Err(IntentError::validation("content", "must not be empty"));
    }

    let request = NewPost {
        title: title.to_string(),
        content: content.to_string(),
        author_id,
    };

    match app.transport().create_post(request).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "post created");
            app.apply(PostsEvent::PostCreated(post.clone()).into());
            Ok(post)
        }
        Err(err) => {
            let message = err.display_message();
            tracing::warn!(error = %err, "post creation failed");
            app.apply(
                PostsEvent::CreateRejected {
                    message: message.clone(),
                }
                .into(),
            );
            Err(IntentError::Transport { message })
        }
    }
}

/// Overwrite a cached post's title and content.
///
/// Returns whether the cache changed: `false` for an uncached post and for
/// an update that repeats the current title and content.
pub fn update_post(app: &AppCore, update: PostUpdate) -> bool {
    app.apply(PostsEvent::PostUpdated(update).into())
}

/// Add one reaction to a cached post. Returns whether the cache changed.
pub fn add_reaction(app: &AppCore, post_id: PostId, reaction: ReactionName) -> bool {
    app.apply(PostsEvent::ReactionAdded { post_id, reaction }.into())
}
