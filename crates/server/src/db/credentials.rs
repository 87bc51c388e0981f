//! Static credential table.

use web_labs_core::{Credential, UserId};

use super::{CredentialRepository, RepositoryError};

/// Credential repository backed by a fixed list.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Vec<Credential>,
}

impl StaticCredentials {
    /// Create a repository from a list of credentials.
    #[must_use]
    pub const fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }
}

impl Default for StaticCredentials {
    /// The single built-in account (`user` / `qwerty`, id 1).
    fn default() -> Self {
        Self::new(vec![Credential::builtin()])
    }
}

impl CredentialRepository for StaticCredentials {
    fn find_by_login(&self, login: &str) -> Result<Option<Credential>, RepositoryError> {
        Ok(self
            .credentials
            .iter()
            .find(|credential| credential.login() == login)
            .cloned())
    }

    fn find_by_id(&self, user_id: UserId) -> Result<Option<Credential>, RepositoryError> {
        Ok(self
            .credentials
            .iter()
            .find(|credential| credential.user_id() == user_id)
            .cloned())
    }
}
