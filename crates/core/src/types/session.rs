//! Per-session authentication and visit state.
//!
//! A session is either anonymous or authenticated as a single user. The
//! anonymous visit count lives in the session itself; authenticated counts
//! are kept per user outside the session, so switching identity never
//! carries a count from one side to the other.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Authentication state of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "user_id", rename_all = "snake_case")]
pub enum AuthState {
    /// No user is logged in.
    #[default]
    Anonymous,
    /// A user is logged in.
    Authenticated(UserId),
}

impl AuthState {
    /// Returns true if a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the logged-in user, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(*id),
        }
    }

    /// Returns the identity used as the visit counter key.
    #[must_use]
    pub const fn identity(&self) -> Identity {
        match self {
            Self::Anonymous => Identity::Anonymous,
            Self::Authenticated(id) => Identity::User(*id),
        }
    }
}

/// Key for visit counting: the anonymous session or an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "user_id", rename_all = "snake_case")]
pub enum Identity {
    /// The anonymous side of the current session.
    Anonymous,
    /// A logged-in user, shared across all of that user's sessions.
    User(UserId),
}

/// Typed session payload.
///
/// Stored as a single value in the session store and written back after
/// every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    auth: AuthState,
    anonymous_visits: u64,
}

impl SessionState {
    /// Create a fresh anonymous session state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the authentication state.
    #[must_use]
    pub const fn auth(&self) -> AuthState {
        self.auth
    }

    /// Returns the current visit-counting identity.
    #[must_use]
    pub const fn identity(&self) -> Identity {
        self.auth.identity()
    }

    /// Returns true if a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Returns the anonymous visit count without changing it.
    #[must_use]
    pub const fn anonymous_visits(&self) -> u64 {
        self.anonymous_visits
    }

    /// Increment and return the anonymous visit count.
    pub const fn record_anonymous_visit(&mut self) -> u64 {
        self.anonymous_visits = self.anonymous_visits.saturating_add(1);
        self.anonymous_visits
    }

    /// Transition to `Authenticated(user_id)`.
    ///
    /// The anonymous visit count is left untouched.
    pub const fn login(&mut self, user_id: UserId) {
        self.auth = AuthState::Authenticated(user_id);
    }

    /// Transition back to `Anonymous`, returning the user that was logged in.
    pub const fn logout(&mut self) -> Option<UserId> {
        let previous = self.auth.user_id();
        self.auth = AuthState::Anonymous;
        previous
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let state = SessionState::new();
        assert_eq!(state.auth(), AuthState::Anonymous);
        assert_eq!(state.identity(), Identity::Anonymous);
        assert_eq!(state.anonymous_visits(), 0);
    }

    #[test]
    fn test_anonymous_visits_count_up() {
        let mut state = SessionState::new();
        let counts: Vec<u64> = (0..5).map(|_| state.record_anonymous_visit()).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_login_logout_keeps_anonymous_count() {
        let mut state = SessionState::new();
        state.record_anonymous_visit();
        state.record_anonymous_visit();

        state.login(UserId::new(1));
        assert!(state.is_authenticated());
        assert_eq!(state.identity(), Identity::User(UserId::new(1)));
        assert_eq!(state.anonymous_visits(), 2);

        assert_eq!(state.logout(), Some(UserId::new(1)));
        assert!(!state.is_authenticated());
        assert_eq!(state.record_anonymous_visit(), 3);
    }

    #[test]
    fn test_logout_when_anonymous_is_noop() {
        let mut state = SessionState::new();
        assert_eq!(state.logout(), None);
        assert_eq!(state.auth(), AuthState::Anonymous);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut state = SessionState::new();
        state.record_anonymous_visit();
        state.login(UserId::new(1));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["auth"]["state"], "authenticated");
        assert_eq!(json["auth"]["user_id"], 1);

        let parsed: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, state);
    }
}
