//! Per-user visit counters.

use std::collections::HashMap;
use std::sync::Mutex;

use web_labs_core::UserId;

use super::{RepositoryError, VisitCounterRepository, lock};

/// Visit counters keyed by user id, kept for the process lifetime.
///
/// Increments are serialized by a mutex so concurrent visits from several
/// sessions of the same user never lose an update.
#[derive(Debug, Default)]
pub struct InMemoryVisitCounters {
    counts: Mutex<HashMap<UserId, u64>>,
}

impl InMemoryVisitCounters {
    /// Create an empty counter table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisitCounterRepository for InMemoryVisitCounters {
    fn increment(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let mut counts = lock(&self.counts, "visit_counters")?;
        let count = counts.entry(user_id).or_insert(0);
        *count = count.saturating_add(1);
        Ok(*count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_first_visit_is_one() {
        let counters = InMemoryVisitCounters::new();
        assert_eq!(counters.increment(UserId::new(1)).unwrap(), 1);
        assert_eq!(counters.increment(UserId::new(1)).unwrap(), 2);
    }

    #[test]
    fn test_users_are_independent() {
        let counters = InMemoryVisitCounters::new();
        counters.increment(UserId::new(1)).unwrap();
        counters.increment(UserId::new(1)).unwrap();
        assert_eq!(counters.increment(UserId::new(2)).unwrap(), 1);
        assert_eq!(counters.increment(UserId::new(1)).unwrap(), 3);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counters = Arc::new(InMemoryVisitCounters::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counters = Arc::clone(&counters);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        counters.increment(UserId::new(1)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counters.increment(UserId::new(1)).unwrap(), 2001);
    }
}
