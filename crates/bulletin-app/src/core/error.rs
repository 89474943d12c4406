//! Intent dispatch errors

use crate::effects::ToastLevel;
use bulletin_core::{BulletinError, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an intent could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IntentError {
    /// The intent needs a logged-in user
    #[error("Not logged in")]
    Unauthenticated,

    /// Login named a user outside the roster
    #[error("Unknown user: {user_id}")]
    UnknownUser {
        /// Requested user
        user_id: UserId,
    },

    /// A field failed validation
    #[error("Invalid {field}: {reason}")]
    Validation {
        /// Offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// The request reached the transport and failed
    #[error("{message}")]
    Transport {
        /// Display message, never empty
        message: String,
    },
}

impl IntentError {
    /// Validation failure for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the user can fix this by changing their input.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownUser { .. })
    }

    /// Toast severity a host should use when surfacing this error.
    #[must_use]
    pub fn toast_severity(&self) -> ToastLevel {
        match self {
            Self::Validation { .. } => ToastLevel::Info,
            Self::Unauthenticated | Self::UnknownUser { .. } => ToastLevel::Warning,
            Self::Transport { .. } => ToastLevel::Error,
        }
    }
}

impl From<IntentError> for BulletinError {
    fn from(err: IntentError) -> Self {
        match err {
            IntentError::Transport { message } => BulletinError::network(message),
            IntentError::UnknownUser { .. } => BulletinError::not_found(err.to_string()),
            IntentError::Unauthenticated | IntentError::Validation { .. } => {
                BulletinError::invalid(err.to_string())
            }
        }
    }
}
