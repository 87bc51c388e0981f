//! Authentication service.
//!
//! Login and logout operate on a [`SessionState`] loaded by the caller; the
//! caller persists the state and handles session id cycling and cookies.

mod error;

pub use error::AuthError;

use uuid::Uuid;

use web_labs_core::{SessionState, UserId};

use crate::db::{CredentialRepository, RememberTokens};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user_id: UserId,
    pub login: String,
    /// Issued when the user asked to be remembered.
    pub remember_token: Option<Uuid>,
}

/// Authentication service.
pub struct AuthService<'a> {
    credentials: &'a dyn CredentialRepository,
    remember_tokens: &'a RememberTokens,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        credentials: &'a dyn CredentialRepository,
        remember_tokens: &'a RememberTokens,
    ) -> Self {
        Self {
            credentials,
            remember_tokens,
        }
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    /// Check credentials and move the session to `Authenticated`.
    ///
    /// `previous_token` is the remember-me token the client already holds; it
    /// is revoked on success since the response replaces or drops that cookie.
    /// On failure the session state and the token are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if either field is blank or the
    /// pair does not match a known credential.
    /// Returns `AuthError::Repository` if a repository is unavailable.
    pub fn login(
        &self,
        state: &mut SessionState,
        login: &str,
        password: &str,
        remember_me: bool,
        previous_token: Option<&str>,
    ) -> Result<AuthenticatedSession, AuthError> {
        if login.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let credential = self
            .credentials
            .find_by_login(login)?
            .filter(|credential| credential.matches(login, password))
            .ok_or(AuthError::InvalidCredentials)?;

        let user_id = credential.user_id();
        if let Some(token) = previous_token {
            self.remember_tokens.revoke(token)?;
        }
        let remember_token = if remember_me {
            Some(self.remember_tokens.issue(user_id)?)
        } else {
            None
        };

        state.login(user_id);

        Ok(AuthenticatedSession {
            user_id,
            login: credential.login().to_string(),
            remember_token,
        })
    }

    /// Move the session back to `Anonymous` and revoke its remember token.
    ///
    /// Returns the user that was logged out, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the token table is unavailable.
    pub fn logout(
        &self,
        state: &mut SessionState,
        remember_token: Option<&str>,
    ) -> Result<Option<UserId>, AuthError> {
        if let Some(token) = remember_token {
            self.remember_tokens.revoke(token)?;
        }
        Ok(state.logout())
    }

    // =========================================================================
    // Remember-me
    // =========================================================================

    /// Restore authentication from a remember-me token.
    ///
    /// Only an anonymous session is changed, and only when the token is valid
    /// and belongs to a known user. Returns the restored user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if a repository is unavailable.
    pub fn restore(
        &self,
        state: &mut SessionState,
        remember_token: &str,
    ) -> Result<Option<UserId>, AuthError> {
        if state.is_authenticated() {
            return Ok(None);
        }

        let Some(user_id) = self.remember_tokens.resolve(remember_token)? else {
            return Ok(None);
        };

        if self.credentials.find_by_id(user_id)?.is_none() {
            return Ok(None);
        }

        state.login(user_id);
        Ok(Some(user_id))
    }
}
