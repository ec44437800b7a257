//! Per-repository policy configuration
//!
//! `RepoOptions` carries the two independent pipeline toggles. It is an
//! explicit construction-time value: set once when the repository is
//! built, immutable afterwards, no ambient global involved.

use serde::{Deserialize, Serialize};

/// Policy toggles for a single repository instance
///
/// Both toggles default to enabled. Disabling one skips the
/// corresponding pipeline stage entirely; with both disabled the
/// repository hands entities to the session byte-for-byte unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOptions {
    /// Run the sanitization plan before each save
    pub sanitize_entity: bool,
    /// Run the validation rule set before each save
    pub validate_entity: bool,
}

impl Default for RepoOptions {
    fn default() -> Self {
        Self {
            sanitize_entity: true,
            validate_entity: true,
        }
    }
}

impl RepoOptions {
    /// Options with both pipeline stages enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with both pipeline stages disabled
    pub fn passthrough() -> Self {
        Self {
            sanitize_entity: false,
            validate_entity: false,
        }
    }

    /// Sets the sanitization toggle
    pub fn with_sanitize_entity(mut self, enabled: bool) -> Self {
        self.sanitize_entity = enabled;
        self
    }

    /// Sets the validation toggle
    pub fn with_validate_entity(mut self, enabled: bool) -> Self {
        self.validate_entity = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_both_stages() {
        let options = RepoOptions::default();
        assert!(options.sanitize_entity);
        assert!(options.validate_entity);
    }

    #[test]
    fn test_passthrough_disables_both_stages() {
        let options = RepoOptions::passthrough();
        assert!(!options.sanitize_entity);
        assert!(!options.validate_entity);
    }

    #[test]
    fn test_toggles_are_independent() {
        let options = RepoOptions::new().with_validate_entity(false);
        assert!(options.sanitize_entity);
        assert!(!options.validate_entity);
    }
}
