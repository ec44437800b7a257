//! Custom Test Assertions
//!
//! Assertion helpers for repository errors that give more meaningful
//! messages than bare `matches!` checks.

use infra_repo::DataAccessError;

/// Asserts that an error is `ValidationFailed` naming the given member
///
/// # Panics
///
/// Panics when the error is a different kind or no violation names the
/// member.
pub fn assert_validation_failure(error: &DataAccessError, field: &str) {
    let violations = error
        .violations()
        .unwrap_or_else(|| panic!("Expected ValidationFailed, got: {error}"));

    assert!(
        violations.iter().any(|v| v.field == field),
        "No violation names '{}': {:?}",
        field,
        violations
    );
}

/// Asserts that an error is the stable concurrency-conflict kind and
/// still carries its provider-level cause
pub fn assert_conflict(error: &DataAccessError) {
    assert!(
        error.is_concurrency_conflict(),
        "Expected ConcurrencyConflict, got: {error}"
    );
    assert!(
        std::error::Error::source(error).is_some(),
        "Conflict must preserve the original provider failure as its source"
    );
}

/// Asserts that an error is an untranslated persistence pass-through
pub fn assert_pass_through(error: &DataAccessError) {
    assert!(
        matches!(error, DataAccessError::Persistence(_)),
        "Expected Persistence pass-through, got: {error}"
    );
}
