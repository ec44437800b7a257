//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! data-access core test suite.
//!
//! # Modules
//!
//! - `fixtures`: The `ContactCard` sample entity and pre-built instances
//! - `builders`: Builder patterns for test data construction
//! - `generators`: Property-based test data generators
//! - `assertions`: Custom assertion helpers for repository errors
//! - `sessions`: Fault-injecting session wrappers

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod sessions;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use sessions::*;
