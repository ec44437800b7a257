//! Member-name descriptors for declarative rule metadata
//!
//! Rules and sanitize actions reference entity members by name. A
//! descriptor records the referenced name together with whether it resolved
//! against the entity's declared member list, so malformed metadata is
//! surfaced as a configuration problem instead of being silently skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes a named member of an entity as referenced by rule metadata
///
/// A descriptor is invalid when the member name is empty or does not appear
/// in the entity's declared field list. Callers building a rule registry
/// check `is_valid()` and fail fast at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionDescriptor {
    member_name: String,
    resolved: bool,
}

impl ExpressionDescriptor {
    /// Resolves a member name against an entity's declared field list
    ///
    /// # Arguments
    ///
    /// * `member_name` - The name referenced by the rule metadata
    /// * `declared` - The entity's declared member names
    pub fn resolve(member_name: impl Into<String>, declared: &[&str]) -> Self {
        let member_name = member_name.into();
        let resolved = !member_name.is_empty() && declared.contains(&member_name.as_str());
        Self {
            member_name,
            resolved,
        }
    }

    /// Creates a descriptor for a name that could not be resolved
    pub fn unresolved(member_name: impl Into<String>) -> Self {
        Self {
            member_name: member_name.into(),
            resolved: false,
        }
    }

    /// The referenced member name
    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    /// Whether the name is non-empty and resolves to a declared member
    pub fn is_valid(&self) -> bool {
        !self.member_name.is_empty() && self.resolved
    }
}

impl fmt::Display for ExpressionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.member_name.is_empty() {
            write!(f, "<unnamed member>")
        } else {
            write!(f, "{}", self.member_name)
        }
    }
}
