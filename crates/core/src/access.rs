//! Access control for protected resources.
//!
//! [`require_auth`] is called at the entry of every protected handler. An
//! anonymous caller gets a [`LoginRedirect`] carrying the originally requested
//! resource so a later successful login can send them back to it.

use crate::types::{AuthState, UserId};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Landing resource used when no `next` destination was supplied.
pub const DEFAULT_LANDING: &str = "/";

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The caller is authenticated as the given user.
    Allow(UserId),
    /// The caller must log in first.
    Redirect(LoginRedirect),
}

/// Redirect to the login page preserving the requested resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    next: String,
}

impl LoginRedirect {
    /// Create a redirect that returns to `next` after login.
    #[must_use]
    pub fn new(next: impl Into<String>) -> Self {
        Self { next: next.into() }
    }

    /// Returns the resource to return to after login.
    #[must_use]
    pub fn next(&self) -> &str {
        &self.next
    }

    /// Returns the redirect location, e.g. `/login?next=%2Fsecret`.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{LOGIN_PATH}?next={}", urlencoding::encode(&self.next))
    }
}

/// Decide whether a caller may access `requested`.
///
/// # Examples
///
/// ```
/// use web_labs_core::{Access, AuthState, UserId, require_auth};
///
/// let denied = require_auth(AuthState::Anonymous, "/secret");
/// let Access::Redirect(redirect) = denied else { panic!("expected redirect") };
/// assert_eq!(redirect.location(), "/login?next=%2Fsecret");
///
/// let allowed = require_auth(AuthState::Authenticated(UserId::new(1)), "/secret");
/// assert_eq!(allowed, Access::Allow(UserId::new(1)));
/// ```
#[must_use]
pub fn require_auth(auth: AuthState, requested: &str) -> Access {
    match auth {
        AuthState::Authenticated(user_id) => Access::Allow(user_id),
        AuthState::Anonymous => Access::Redirect(LoginRedirect::new(requested)),
    }
}

/// Pick where a successful login should redirect.
///
/// Precedence: query-string `next`, then form-submitted `next`, then
/// `fallback`. Empty values are skipped.
#[must_use]
pub fn resolve_next_destination<'a>(
    explicit_next: Option<&'a str>,
    form_next: Option<&'a str>,
    fallback: &'a str,
) -> &'a str {
    explicit_next
        .filter(|next| !next.is_empty())
        .or_else(|| form_next.filter(|next| !next.is_empty()))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_redirected_with_next() {
        let access = require_auth(AuthState::Anonymous, "/secret");
        assert_eq!(access, Access::Redirect(LoginRedirect::new("/secret")));
    }

    #[test]
    fn test_location_encodes_next() {
        assert_eq!(
            LoginRedirect::new("/secret").location(),
            "/login?next=%2Fsecret"
        );
        assert_eq!(
            LoginRedirect::new("/posts?page=2").location(),
            "/login?next=%2Fposts%3Fpage%3D2"
        );
    }

    #[test]
    fn test_authenticated_is_allowed() {
        let access = require_auth(AuthState::Authenticated(UserId::new(1)), "/secret");
        assert_eq!(access, Access::Allow(UserId::new(1)));
    }

    #[test]
    fn test_next_precedence() {
        assert_eq!(
            resolve_next_destination(Some("/a"), Some("/b"), DEFAULT_LANDING),
            "/a"
        );
        assert_eq!(
            resolve_next_destination(None, Some("/b"), DEFAULT_LANDING),
            "/b"
        );
        assert_eq!(resolve_next_destination(None, None, DEFAULT_LANDING), "/");
    }

    #[test]
    fn test_empty_next_is_skipped() {
        assert_eq!(
            resolve_next_destination(Some(""), Some("/secret"), DEFAULT_LANDING),
            "/secret"
        );
        assert_eq!(resolve_next_destination(Some(""), Some(""), "/home"), "/home");
    }
}
