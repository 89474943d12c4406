//! Users slice state.
//!
//! The roster is static for the lifetime of the app; it is seeded at
//! construction and never reduced.

use bulletin_core::UserId;
use serde::{Deserialize, Serialize};

/// A known author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier referenced by `Post::author_id`
    pub id: UserId,
    /// Display name
    pub name: String,
}

impl User {
    /// Create a user.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The user roster in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersState {
    users: Vec<User>,
}

impl UsersState {
    /// Roster from an explicit list.
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The default demo roster.
    pub fn seeded() -> Self {
        Self::new(vec![
            User::new("0", "Andy Gifford"),
            User::new("1", "Alison Gifford"),
            User::new("2", "Ben Gifford"),
        ])
    }

    /// All users in roster order.
    pub fn all(&self) -> &[User] {
        &self.users
    }

    /// Look up a user.
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }
}

impl Default for UsersState {
    fn default() -> Self {
        Self::seeded()
    }
}
