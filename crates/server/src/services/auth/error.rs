//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::messages;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown login, wrong password or a blank field.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    /// Message shown on the login page, if the error is user-facing.
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCredentials => Some(messages::LOGIN_FAILED),
            Self::Repository(_) => None,
        }
    }
}
