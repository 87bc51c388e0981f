//! Visit counting.

use web_labs_core::{Identity, SessionState};

use crate::db::{RepositoryError, VisitCounterRepository};

/// Counts visits per identity.
///
/// Anonymous visits are counted in the session state; authenticated visits
/// go to the per-user repository shared by all of that user's sessions.
pub struct VisitCounter<'a> {
    counters: &'a dyn VisitCounterRepository,
}

impl<'a> VisitCounter<'a> {
    #[must_use]
    pub const fn new(counters: &'a dyn VisitCounterRepository) -> Self {
        Self { counters }
    }

    /// Record a visit for the session's current identity and return its count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the per-user counters are unavailable.
    pub fn visit(&self, state: &mut SessionState) -> Result<u64, RepositoryError> {
        match state.identity() {
            Identity::Anonymous => Ok(state.record_anonymous_visit()),
            Identity::User(user_id) => self.counters.increment(user_id),
        }
    }
}
