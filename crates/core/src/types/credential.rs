//! Login credential types.

use secrecy::{ExposeSecret, SecretString};

use super::UserId;

/// A login/password pair belonging to a user.
///
/// The password is held as a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credential {
    user_id: UserId,
    login: String,
    password: SecretString,
}

impl Credential {
    /// Create a new credential record.
    #[must_use]
    pub fn new(user_id: UserId, login: impl Into<String>, password: SecretString) -> Self {
        Self {
            user_id,
            login: login.into(),
            password,
        }
    }

    /// The single built-in account: user id `1`, login `user`, password `qwerty`.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(UserId::new(1), "user", SecretString::from("qwerty"))
    }

    /// Returns the ID of the user owning this credential.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the login name.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Returns true if both login and password match exactly.
    #[must_use]
    pub fn matches(&self, login: &str, password: &str) -> bool {
        self.login == login && self.password.expose_secret() == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matches_exact_pair() {
        let credential = Credential::builtin();
        assert_eq!(credential.user_id(), UserId::new(1));
        assert_eq!(credential.login(), "user");
        assert!(credential.matches("user", "qwerty"));
    }

    #[test]
    fn test_mismatches() {
        let credential = Credential::builtin();
        assert!(!credential.matches("user", "wrong"));
        assert!(!credential.matches("User", "qwerty"));
        assert!(!credential.matches("user", "qwerty "));
        assert!(!credential.matches("", ""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug_output = format!("{:?}", Credential::builtin());
        assert!(debug_output.contains("user"));
        assert!(!debug_output.contains("qwerty"));
    }
}
