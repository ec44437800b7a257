//! Entity validation service
//!
//! Validation is an explicit registry of per-member rules, built once and
//! evaluated functionally. Evaluating a rule set never mutates the entity
//! and never raises for "entity is invalid" - the returned collection of
//! failures is the signal, with an empty collection meaning the entity is
//! valid.
//!
//! Rule order is preserved: failures come back in the order the rules were
//! registered, so callers can render them deterministically.

use access_kernel::{Entity, ExpressionDescriptor};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::RuleError;

/// One failed rule: the offending member and a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Name of the member that failed the rule
    pub field: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A declarative rule attached to one entity member
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// The member must be present and non-blank
    Required,
    /// The member, when non-empty, must be at least this many characters
    MinLength(usize),
    /// The member must be at most this many characters
    MaxLength(usize),
    /// The member, when non-empty, must match this pattern
    Pattern(Regex),
}

impl FieldRule {
    /// Evaluates this rule against a member value
    ///
    /// `value` is `None` when the entity does not expose the member as
    /// text; bound rules treat that the same as an empty value.
    fn check(&self, field: &str, value: Option<&str>) -> Option<ValidationFailure> {
        let value = value.unwrap_or("");
        match self {
            FieldRule::Required => {
                if value.trim().is_empty() {
                    return Some(ValidationFailure::new(field, format!("{field} is required")));
                }
            }
            FieldRule::MinLength(min) => {
                if !value.is_empty() && value.chars().count() < *min {
                    return Some(ValidationFailure::new(
                        field,
                        format!("{field} must be at least {min} characters"),
                    ));
                }
            }
            FieldRule::MaxLength(max) => {
                if value.chars().count() > *max {
                    return Some(ValidationFailure::new(
                        field,
                        format!("{field} must be at most {max} characters"),
                    ));
                }
            }
            FieldRule::Pattern(pattern) => {
                if !value.is_empty() && !pattern.is_match(value) {
                    return Some(ValidationFailure::new(
                        field,
                        format!("{field} does not match the required format"),
                    ));
                }
            }
        }
        None
    }
}

/// Unbound rule metadata as supplied to the builder
#[derive(Debug, Clone)]
enum RuleSpec {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(String),
}

#[derive(Debug)]
struct BoundRule {
    descriptor: ExpressionDescriptor,
    rule: FieldRule,
}

/// An ordered registry of validation rules bound to one entity type
///
/// Built via [`RuleSet::builder`], which accumulates raw metadata, then
/// bound with [`RuleSetBuilder::bind`] against the entity's declared
/// members. Binding fails fast on unknown members and uncompilable
/// patterns, so a repository holding a `RuleSet` can evaluate it without
/// further configuration checks.
///
/// # Example
///
/// ```rust,ignore
/// let rules = RuleSet::builder()
///     .required("display_name")
///     .max_length("display_name", 120)
///     .pattern("email", r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
///     .bind::<ContactCard>()?;
///
/// let failures = rules.validate(&card);
/// ```
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<BoundRule>,
}

impl RuleSet {
    /// Starts building a rule registry
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// An empty registry; every entity validates cleanly
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of bound rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates every rule against the entity
    ///
    /// Returns the full ordered list of violations; an empty vector means
    /// the entity passed. Pure - the entity is never mutated.
    pub fn validate(&self, entity: &dyn Entity) -> Vec<ValidationFailure> {
        let failures: Vec<ValidationFailure> = self
            .rules
            .iter()
            .filter_map(|bound| {
                let name = bound.descriptor.member_name();
                bound.rule.check(name, entity.text_field(name))
            })
            .collect();

        if !failures.is_empty() {
            debug!(violations = failures.len(), "entity failed validation");
        }
        failures
    }
}

/// Accumulates rule metadata before it is bound to an entity type
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    specs: Vec<(String, RuleSpec)>,
}

impl RuleSetBuilder {
    /// Requires the member to be present and non-blank
    pub fn required(mut self, field: impl Into<String>) -> Self {
        self.specs.push((field.into(), RuleSpec::Required));
        self
    }

    /// Requires a minimum character count when the member is non-empty
    pub fn min_length(mut self, field: impl Into<String>, min: usize) -> Self {
        self.specs.push((field.into(), RuleSpec::MinLength(min)));
        self
    }

    /// Caps the member's character count
    pub fn max_length(mut self, field: impl Into<String>, max: usize) -> Self {
        self.specs.push((field.into(), RuleSpec::MaxLength(max)));
        self
    }

    /// Requires the member to match a pattern; compiled during `bind`
    pub fn pattern(mut self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.specs
            .push((field.into(), RuleSpec::Pattern(pattern.into())));
        self
    }

    /// Binds the accumulated metadata to an entity type
    ///
    /// Every referenced member is resolved through an
    /// [`ExpressionDescriptor`]; an unknown member or an uncompilable
    /// pattern aborts the bind. Rule order is preserved.
    pub fn bind<E: Entity>(self) -> Result<RuleSet, RuleError> {
        let declared = E::fields();
        let mut rules = Vec::with_capacity(self.specs.len());

        for (field, spec) in self.specs {
            let descriptor = ExpressionDescriptor::resolve(field, declared);
            if !descriptor.is_valid() {
                return Err(RuleError::UnknownMember {
                    entity: E::entity_name().to_string(),
                    member: descriptor.member_name().to_string(),
                });
            }

            let rule = match spec {
                RuleSpec::Required => FieldRule::Required,
                RuleSpec::MinLength(min) => FieldRule::MinLength(min),
                RuleSpec::MaxLength(max) => FieldRule::MaxLength(max),
                RuleSpec::Pattern(source) => {
                    let pattern =
                        Regex::new(&source).map_err(|source| RuleError::InvalidPattern {
                            member: descriptor.member_name().to_string(),
                            source,
                        })?;
                    FieldRule::Pattern(pattern)
                }
            };

            rules.push(BoundRule { descriptor, rule });
        }

        Ok(RuleSet { rules })
    }
}
