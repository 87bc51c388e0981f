//! Remember-me tokens.
//!
//! A token is issued at login when the user asks to be remembered. The
//! client keeps it in a persistent cookie that outlives the session, and a
//! later request carrying it is logged back in as the token's user.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use web_labs_core::UserId;

use super::{RepositoryError, lock};

#[derive(Debug, Clone, Copy)]
struct TokenRecord {
    user_id: UserId,
    issued_at: DateTime<Utc>,
}

/// Issued remember-me tokens, valid for a fixed lifetime.
#[derive(Debug)]
pub struct RememberTokens {
    ttl: TimeDelta,
    tokens: Mutex<HashMap<Uuid, TokenRecord>>,
}

impl RememberTokens {
    /// Create an empty token table whose tokens expire after `ttl`.
    #[must_use]
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            ttl,
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a new random token for a user.
    ///
    /// Expired tokens are pruned from the table first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the token table is unavailable.
    pub fn issue(&self, user_id: UserId) -> Result<Uuid, RepositoryError> {
        self.issue_at(user_id, Utc::now())
    }

    fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<Uuid, RepositoryError> {
        let mut tokens = lock(&self.tokens, "remember_tokens")?;
        let before = tokens.len();
        tokens.retain(|_, record| now - record.issued_at < self.ttl);
        let pruned = before - tokens.len();
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned expired remember tokens");
        }

        let token = Uuid::new_v4();
        tokens.insert(
            token,
            TokenRecord {
                user_id,
                issued_at: now,
            },
        );
        Ok(token)
    }

    #[cfg(test)]
    fn len(&self) -> Result<usize, RepositoryError> {
        Ok(lock(&self.tokens, "remember_tokens")?.len())
    }

    /// Resolve a token (as sent in the cookie) to its user.
    ///
    /// Malformed, unknown and expired tokens resolve to `None`; expired ones
    /// are dropped from the table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the token table is unavailable.
    pub fn resolve(&self, token: &str) -> Result<Option<UserId>, RepositoryError> {
        self.resolve_at(token, Utc::now())
    }

    fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Result<Option<UserId>, RepositoryError> {
        let Ok(token) = Uuid::parse_str(token) else {
            return Ok(None);
        };

        let mut tokens = lock(&self.tokens, "remember_tokens")?;
        match tokens.get(&token).copied() {
            Some(record) if now - record.issued_at < self.ttl => Ok(Some(record.user_id)),
            Some(_) => {
                tokens.remove(&token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Revoke a token. Returns true if it was known.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the token table is unavailable.
    pub fn revoke(&self, token: &str) -> Result<bool, RepositoryError> {
        let Ok(token) = Uuid::parse_str(token) else {
            return Ok(false);
        };
        Ok(lock(&self.tokens, "remember_tokens")?
            .remove(&token)
            .is_some())
    }
}
