//! Domain Rules - declarative per-field entity policies
//!
//! This crate provides the two policy services consulted by a repository
//! before it touches the persistence session:
//!
//! - **Validation**: an explicit rule registry keyed by member name,
//!   built once at repository construction and evaluated functionally.
//!   A validation pass returns every violation, not just the first.
//! - **Sanitization**: an ordered plan of normalizing transforms applied
//!   in place to declared members before a write. Sanitization is
//!   idempotent and never touches members outside its declared scope.
//!
//! Both services resolve member names through
//! [`access_kernel::ExpressionDescriptor`] and reject malformed metadata
//! at construction time rather than at call time.

pub mod error;
pub mod sanitize;
pub mod validation;

pub use error::RuleError;
pub use sanitize::{SanitizeAction, SanitizeError, SanitizePlan, SanitizePlanBuilder};
pub use validation::{FieldRule, RuleSet, RuleSetBuilder, ValidationFailure};
