//! Optimistic-concurrency conflict matching
//!
//! Centralizing the wrapped-error shape in one constructor
//! ([`DataAccessError::concurrency_conflict`]) guarantees callers can
//! catch exactly one error kind regardless of which provider backs a
//! repository instance. What varies per provider is *recognition*: which
//! session failures mean "the row moved under you". That decision is a
//! predicate injected into the repository, so a new store plugs in by
//! supplying a matcher rather than by the repository knowing every
//! provider's failure taxonomy.

use std::sync::Arc;

use crate::error::SessionError;

/// Predicate deciding whether a session failure is a concurrency conflict
pub type ConflictMatcher = Arc<dyn Fn(&SessionError) -> bool + Send + Sync>;

/// The default matcher: stale version tokens and rows that vanished under
/// an update or delete are conflicts; cancellations and everything else
/// are not.
pub fn default_conflict_matcher() -> ConflictMatcher {
    Arc::new(|error: &SessionError| {
        matches!(
            error,
            SessionError::StaleVersion { .. } | SessionError::RowMissing { .. }
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_kernel::EntityKey;

    #[test]
    fn test_default_matcher_hits_conflict_signatures() {
        let matcher = default_conflict_matcher();
        let key = EntityKey::new();

        assert!(matcher(&SessionError::StaleVersion {
            entity: "Note",
            key
        }));
        assert!(matcher(&SessionError::RowMissing {
            entity: "Note",
            key
        }));
    }

    #[test]
    fn test_default_matcher_ignores_other_failures() {
        let matcher = default_conflict_matcher();

        assert!(!matcher(&SessionError::backend("timeout")));
        assert!(!matcher(&SessionError::ConnectionFailed("refused".into())));
        assert!(!matcher(&SessionError::Cancelled));
    }

    #[test]
    fn test_custom_matcher_can_narrow_recognition() {
        // A provider without version tokens may treat only missing rows
        // as conflicts.
        let matcher: ConflictMatcher = Arc::new(|e| e.is_row_missing());
        let key = EntityKey::new();

        assert!(matcher(&SessionError::RowMissing {
            entity: "Note",
            key
        }));
        assert!(!matcher(&SessionError::StaleVersion {
            entity: "Note",
            key
        }));
    }
}
