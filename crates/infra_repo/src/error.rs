//! Data-access error types
//!
//! Two taxonomies live here. [`SessionError`] is the provider-level
//! taxonomy a persistence session raises; it is what a store adapter maps
//! its native failures into. [`DataAccessError`] is the caller-facing
//! taxonomy the repository surfaces; validation and sanitization failures
//! are detected before any write, and exactly one of
//! `ConcurrencyConflict` / `Persistence` is produced per failed commit.

use access_kernel::EntityKey;
use domain_rules::{SanitizeError, ValidationFailure};
use thiserror::Error;

/// Failures raised by a persistence session
///
/// Adapters map their native errors into these variants; the repository
/// decides (via its conflict matcher) which of them represent an
/// optimistic-concurrency conflict.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The row's stored version token no longer matches the caller's
    #[error("Stale version for {entity} {key}: the stored row has been modified")]
    StaleVersion { entity: &'static str, key: EntityKey },

    /// The row targeted by an update or delete no longer exists
    #[error("Row missing for {entity} {key}")]
    RowMissing { entity: &'static str, key: EntityKey },

    /// Connection to the underlying store failed
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Any other provider failure
    #[error("Backend failure: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,
}

impl SessionError {
    /// Creates a backend failure without a source
    pub fn backend(message: impl Into<String>) -> Self {
        SessionError::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Checks if this error is a stale-version rejection
    pub fn is_stale_version(&self) -> bool {
        matches!(self, SessionError::StaleVersion { .. })
    }

    /// Checks if this error reports a missing row
    pub fn is_row_missing(&self) -> bool {
        matches!(self, SessionError::RowMissing { .. })
    }

    /// Checks if this error is a propagated cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionError::Cancelled)
    }
}

/// Errors surfaced by repository operations
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// One or more field rules rejected the entity; carries the full
    /// ordered violation list. No write was attempted.
    #[error("Entity failed validation with {} violation(s)", .0.len())]
    ValidationFailed(Vec<ValidationFailure>),

    /// Sanitization could not normalize a member. No write was attempted.
    #[error(transparent)]
    Sanitization(#[from] SanitizeError),

    /// The persisted version diverged from the version this update was
    /// based on. Created only by the conflict translator; always wraps
    /// the original provider failure as its source.
    #[error("Concurrency conflict: {message}")]
    ConcurrencyConflict {
        message: String,
        #[source]
        source: SessionError,
    },

    /// Any provider failure not matching the concurrency signature,
    /// passed through unmodified.
    #[error(transparent)]
    Persistence(#[from] SessionError),
}

impl DataAccessError {
    /// Translates a provider concurrency failure into the stable kind
    ///
    /// Pure wrapping: the original failure is preserved as the error
    /// source and is never discarded. Matching whether a failure *is* a
    /// concurrency conflict is the repository's job, not this
    /// constructor's.
    pub fn concurrency_conflict(message: impl Into<String>, source: SessionError) -> Self {
        DataAccessError::ConcurrencyConflict {
            message: message.into(),
            source,
        }
    }

    /// Checks if this error is the stable concurrency-conflict kind
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, DataAccessError::ConcurrencyConflict { .. })
    }

    /// Checks if this error is a validation rejection
    pub fn is_validation_failed(&self) -> bool {
        matches!(self, DataAccessError::ValidationFailed(_))
    }

    /// The violation list, when this is a validation rejection
    pub fn violations(&self) -> Option<&[ValidationFailure]> {
        match self {
            DataAccessError::ValidationFailed(failures) => Some(failures),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_conflict_preserves_cause() {
        let key = EntityKey::new();
        let cause = SessionError::StaleVersion {
            entity: "Note",
            key,
        };
        let error = DataAccessError::concurrency_conflict("save rejected", cause);

        assert!(error.is_concurrency_conflict());
        match &error {
            DataAccessError::ConcurrencyConflict { source, .. } => {
                assert!(source.is_stale_version());
            }
            _ => panic!("Expected ConcurrencyConflict"),
        }

        // The source participates in the std error chain
        let source = std::error::Error::source(&error).expect("source must be preserved");
        assert!(source.to_string().contains("Stale version"));
    }

    #[test]
    fn test_validation_failed_reports_count() {
        let error = DataAccessError::ValidationFailed(vec![
            ValidationFailure::new("title", "title is required"),
            ValidationFailure::new("body", "body is too long"),
        ]);

        assert!(error.is_validation_failed());
        assert_eq!(error.violations().unwrap().len(), 2);
        assert!(error.to_string().contains("2 violation(s)"));
    }

    #[test]
    fn test_persistence_pass_through_is_transparent() {
        let error: DataAccessError = SessionError::backend("disk full").into();
        assert_eq!(error.to_string(), "Backend failure: disk full");
        assert!(!error.is_concurrency_conflict());
    }

    #[test]
    fn test_session_error_predicates() {
        let key = EntityKey::new();
        assert!(SessionError::RowMissing { entity: "Note", key }.is_row_missing());
        assert!(SessionError::Cancelled.is_cancelled());
        assert!(!SessionError::backend("x").is_stale_version());
    }
}
