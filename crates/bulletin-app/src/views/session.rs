//! Session slice state.

use bulletin_core::UserId;
use serde::{Deserialize, Serialize};

/// Who is logged in, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) current_user: Option<UserId>,
}

impl SessionState {
    /// The logged-in user.
    pub fn current_user(&self) -> Option<&UserId> {
        self.current_user.as_ref()
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}
