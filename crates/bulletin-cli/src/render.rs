//! Plain-text and JSON rendering of app state.

use anyhow::Result;
use bulletin_app::{NotificationsState, PostsState, ToastBoard, UsersState};
use bulletin_core::{Notification, Post, ReactionName};
use serde_json::json;

/// Output sink selected by `--json`.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn posts(&self, state: &PostsState, users: &UsersState) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(state)?);
            return Ok(());
        }

        println!("Posts ({}):", state.status());
        if let Some(error) = state.error() {
            println!("  error: {error}");
        }
        if state.posts().is_empty() {
            println!("  (none)");
        }
        for post in state.posts().iter() {
            println!("{}", post_line(post, users));
        }
        Ok(())
    }

    pub fn notifications(&self, state: &NotificationsState, users: &UsersState) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(state)?);
            return Ok(());
        }

        println!("Notifications ({} unread):", state.unread_count());
        if state.notifications().is_empty() {
            println!("  (none)");
        }
        for notification in state.notifications().iter() {
            println!("{}", notification_line(notification, users));
        }
        Ok(())
    }

    pub fn users(&self, users: &UsersState) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(users.all())?);
            return Ok(());
        }
        for user in users.all() {
            println!("{:>4}  {}", user.id, user.name);
        }
        Ok(())
    }

    pub fn toasts(&self, board: &ToastBoard) -> Result<()> {
        let toasts = board.active();
        if self.json {
            let rendered: Vec<_> = toasts
                .iter()
                .map(|toast| {
                    json!({
                        "id": toast.ticket.id.to_string(),
                        "message": toast.message,
                        "expiresAfterMs": toast.ticket.expires_after.as_millis() as u64,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
            return Ok(());
        }
        if toasts.is_empty() {
            println!("Toasts: (none)");
        }
        for toast in toasts {
            println!("{} {}", toast.level.icon(), toast.message);
        }
        Ok(())
    }
}

fn post_line(post: &Post, users: &UsersState) -> String {
    let author = users
        .get(&post.author_id)
        .map(|user| user.name.as_str())
        .unwrap_or("Unknown author");
    let reactions: Vec<String> = ReactionName::ALL
        .iter()
        .map(|name| format!("{} {}", name.emoji(), post.reactions.get(*name)))
        .collect();
    format!(
        "  [{}] {} by {} ({})\n      {}\n      {}",
        post.id,
        post.title,
        author,
        post.created_at,
        post.content,
        reactions.join("  ")
    )
}

fn notification_line(notification: &Notification, users: &UsersState) -> String {
    let who = users
        .get(&notification.user_id)
        .map(|user| user.name.as_str())
        .unwrap_or("Unknown User");
    let marker = if notification.is_new { "*" } else { " " };
    format!(
        "  {marker} {who} {} ({})",
        notification.message, notification.created_at
    )
}
