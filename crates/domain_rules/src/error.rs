//! Rule metadata errors
//!
//! These are configuration problems - a rule referencing a member the
//! entity does not declare, or an uncompilable pattern. They are distinct
//! from a normal validation failure and surface when a rule set or
//! sanitize plan is bound to an entity type, before any repository
//! operation runs.

use access_kernel::CoreError;
use thiserror::Error;

/// Errors raised while binding rule metadata to an entity type
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rule references a member the entity does not declare
    #[error("Rule references unknown member '{member}' on entity '{entity}'")]
    UnknownMember { entity: String, member: String },

    /// A pattern rule failed to compile
    #[error("Invalid pattern for member '{member}': {source}")]
    InvalidPattern {
        member: String,
        #[source]
        source: regex::Error,
    },
}

impl From<RuleError> for CoreError {
    fn from(error: RuleError) -> Self {
        match error {
            RuleError::UnknownMember { entity, member } => {
                CoreError::unknown_member(entity, member)
            }
            other => CoreError::configuration(other.to_string()),
        }
    }
}
