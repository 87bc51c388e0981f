//! In-memory repositories for server state.
//!
//! Nothing is persisted: credentials are a static table, and per-user visit
//! counters and remember-me tokens live for the lifetime of the process.
//! Anonymous visit counts are not stored here; they live in the session.
//!
//! Handlers reach the repositories through traits held in
//! [`AppState`](crate::state::AppState), so tests can inject their own.

pub mod counters;
pub mod credentials;
pub mod remember_tokens;

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use web_labs_core::{Credential, UserId};

pub use counters::InMemoryVisitCounters;
pub use credentials::StaticCredentials;
pub use remember_tokens::RememberTokens;

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A thread panicked while holding the repository lock.
    #[error("repository lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

/// Lookup of login credentials.
pub trait CredentialRepository: Send + Sync {
    /// Find the credential with the given login name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store is unavailable.
    fn find_by_login(&self, login: &str) -> Result<Option<Credential>, RepositoryError>;

    /// Find the credential belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store is unavailable.
    fn find_by_id(&self, user_id: UserId) -> Result<Option<Credential>, RepositoryError>;
}

/// Per-user visit counters shared by all of a user's sessions.
pub trait VisitCounterRepository: Send + Sync {
    /// Atomically increment and return the count for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store is unavailable.
    fn increment(&self, user_id: UserId) -> Result<u64, RepositoryError>;
}

/// Lock a repository mutex, mapping poisoning to a `RepositoryError`.
fn lock<'a, T>(
    mutex: &'a Mutex<T>,
    name: &'static str,
) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex.lock().map_err(|_| {
        tracing::error!(repository = name, "Repository lock poisoned");
        RepositoryError::LockPoisoned(name)
    })
}
