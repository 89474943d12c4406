//! Post and notification fixtures.

use bulletin_core::{Notification, NotificationId, Post, PostId, Reactions, UserId};

/// A post with the given id and date, authored by user `"0"`.
pub fn post(id: &str, date: &str) -> Post {
    post_by(id, "0", date)
}

/// A post with the given id, author and date.
pub fn post_by(id: &str, author: &str, date: &str) -> Post {
    Post {
        id: PostId::new(id),
        title: format!("Post {id}"),
        content: format!("Content of post {id}"),
        author_id: UserId::new(author),
        created_at: date.to_string(),
        reactions: Reactions::default(),
    }
}

/// Two posts dated so that `"1"` is newer than `"2"`.
pub fn dated_pair() -> Vec<Post> {
    vec![
        post("1", "2023-01-02T00:00:00.000Z"),
        post("2", "2023-01-01T00:00:00.000Z"),
    ]
}

/// An unread, new notification about `user`.
pub fn notification(id: &str, user: &str, date: &str) -> Notification {
    Notification {
        id: NotificationId::new(id),
        user_id: UserId::new(user),
        message: format!("notification {id}"),
        created_at: date.to_string(),
        read: false,
        is_new: true,
    }
}
