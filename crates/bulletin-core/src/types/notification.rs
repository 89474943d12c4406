//! Server notifications about activity on the board.

use super::identifiers::{NotificationId, UserId};
use serde::{Deserialize, Serialize};

/// A notification as cached by the client.
///
/// The server sends `id`, `date`, `message` and `user`. `read` and `is_new`
/// are client-side flags and default to unread and new on arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Server-assigned identifier
    pub id: NotificationId,
    /// User the notification is about
    #[serde(rename = "user")]
    pub user_id: UserId,
    /// Text following the user's name
    pub message: String,
    /// ISO-8601 timestamp, ordered lexically
    #[serde(rename = "date")]
    pub created_at: String,
    /// Seen by the user in the notifications list
    #[serde(default)]
    pub read: bool,
    /// Arrived since the list was last viewed
    #[serde(default = "arrives_new")]
    pub is_new: bool,
}

fn arrives_new() -> bool {
    true
}

impl Notification {
    /// Newest-first presentation order by timestamp.
    pub fn newest_first(a: &Notification, b: &Notification) -> std::cmp::Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_payload_arrives_unread_and_new() {
        let json = r#"{"id":"n1","date":"2023-01-05T10:00:00.000Z","message":"says hi","user":"2"}"#;
        let notification: Notification = serde_json::from_str(json).unwrap();

        assert_eq!(notification.user_id, UserId::new("2"));
        assert!(!notification.read);
        assert!(notification.is_new);

        let back = serde_json::to_value(&notification).unwrap();
        assert_eq!(back["isNew"], true);
        assert_eq!(back["date"], "2023-01-05T10:00:00.000Z");
    }
}
