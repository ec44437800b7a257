//! Entity sanitization service
//!
//! Sanitization normalizes member values in place before a write: trimming
//! whitespace, collapsing runs of spaces, escaping markup-significant
//! characters. Two invariants bound the blast radius:
//!
//! - **Idempotence**: applying a plan to already-sanitized values changes
//!   nothing. Markup escaping therefore rewrites only `<`, `>`, and `"`
//!   (whose replacements contain none of those characters) and leaves `&`
//!   alone, so a second pass finds nothing to rewrite.
//! - **Scope**: members not named in the plan are never touched.
//!
//! Input that cannot be normalized - embedded control characters other
//! than tab and newline - is rejected rather than silently altered.

use access_kernel::{Entity, ExpressionDescriptor};
use thiserror::Error;
use tracing::debug;

use crate::error::RuleError;

/// A sanitization failure; treated as a caller input error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizeError {
    /// The member contains input that cannot be normalized
    #[error("Member '{field}' contains control characters that cannot be normalized")]
    Unnormalizable { field: String },
}

/// One normalizing transform applied to a member value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeAction {
    /// Strips leading and trailing whitespace
    Trim,
    /// Collapses internal whitespace runs to single spaces
    CollapseWhitespace,
    /// Escapes `<`, `>`, and `"` as HTML entities
    EscapeMarkup,
}

impl SanitizeAction {
    /// Applies the transform, returning the value unchanged when already
    /// normalized.
    fn apply(&self, field: &str, value: &str) -> Result<String, SanitizeError> {
        if value
            .chars()
            .any(|c| c.is_control() && c != '\t' && c != '\n')
        {
            return Err(SanitizeError::Unnormalizable {
                field: field.to_string(),
            });
        }

        let out = match self {
            SanitizeAction::Trim => value.trim().to_string(),
            SanitizeAction::CollapseWhitespace => {
                let mut out = String::with_capacity(value.len());
                let mut in_run = false;
                for c in value.chars() {
                    if c == ' ' {
                        if !in_run {
                            out.push(' ');
                        }
                        in_run = true;
                    } else {
                        in_run = false;
                        out.push(c);
                    }
                }
                out
            }
            SanitizeAction::EscapeMarkup => {
                // `&` is deliberately left alone: escaping it would
                // double-encode on a second pass and break idempotence.
                let mut out = String::with_capacity(value.len());
                for c in value.chars() {
                    match c {
                        '<' => out.push_str("&lt;"),
                        '>' => out.push_str("&gt;"),
                        '"' => out.push_str("&quot;"),
                        other => out.push(other),
                    }
                }
                out
            }
        };

        Ok(out)
    }
}

#[derive(Debug)]
struct PlannedAction {
    descriptor: ExpressionDescriptor,
    action: SanitizeAction,
}

/// An ordered sanitization plan bound to one entity type
///
/// Built via [`SanitizePlan::builder`] and bound with
/// [`SanitizePlanBuilder::bind`], which resolves every member name and
/// fails fast on metadata referencing undeclared members.
#[derive(Debug, Default)]
pub struct SanitizePlan {
    actions: Vec<PlannedAction>,
}

impl SanitizePlan {
    /// Starts building a sanitization plan
    pub fn builder() -> SanitizePlanBuilder {
        SanitizePlanBuilder::default()
    }

    /// An empty plan; applying it is a no-op
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of planned actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the plan holds no actions
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Applies every planned action to the entity in place
    ///
    /// Actions run in registration order. The first unnormalizable member
    /// aborts the pass; members already processed keep their normalized
    /// values, which is safe because no write has been attempted yet.
    pub fn apply(&self, entity: &mut dyn Entity) -> Result<(), SanitizeError> {
        for planned in &self.actions {
            let name = planned.descriptor.member_name();
            let Some(current) = entity.text_field(name) else {
                continue;
            };
            let normalized = planned.action.apply(name, current)?;
            if normalized != current {
                debug!(field = name, action = ?planned.action, "sanitized member");
                entity.set_text_field(name, normalized);
            }
        }
        Ok(())
    }
}

/// Accumulates sanitize metadata before it is bound to an entity type
#[derive(Debug, Default)]
pub struct SanitizePlanBuilder {
    specs: Vec<(String, SanitizeAction)>,
}

impl SanitizePlanBuilder {
    /// Registers a transform for a member; order is preserved
    pub fn action(mut self, field: impl Into<String>, action: SanitizeAction) -> Self {
        self.specs.push((field.into(), action));
        self
    }

    /// Shorthand for `action(field, SanitizeAction::Trim)`
    pub fn trim(self, field: impl Into<String>) -> Self {
        self.action(field, SanitizeAction::Trim)
    }

    /// Shorthand for `action(field, SanitizeAction::CollapseWhitespace)`
    pub fn collapse_whitespace(self, field: impl Into<String>) -> Self {
        self.action(field, SanitizeAction::CollapseWhitespace)
    }

    /// Shorthand for `action(field, SanitizeAction::EscapeMarkup)`
    pub fn escape_markup(self, field: impl Into<String>) -> Self {
        self.action(field, SanitizeAction::EscapeMarkup)
    }

    /// Binds the accumulated metadata to an entity type
    pub fn bind<E: Entity>(self) -> Result<SanitizePlan, RuleError> {
        let declared = E::fields();
        let mut actions = Vec::with_capacity(self.specs.len());

        for (field, action) in self.specs {
            let descriptor = ExpressionDescriptor::resolve(field, declared);
            if !descriptor.is_valid() {
                return Err(RuleError::UnknownMember {
                    entity: E::entity_name().to_string(),
                    member: descriptor.member_name().to_string(),
                });
            }
            actions.push(PlannedAction { descriptor, action });
        }

        Ok(SanitizePlan { actions })
    }
}
