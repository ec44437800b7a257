//! Access Kernel - Foundational types for the data-access core
//!
//! This crate provides the building blocks shared by every layer of the
//! repository stack:
//! - Strongly-typed entity identifiers and optimistic version tokens
//! - The `Entity` trait through which policies address named fields
//! - Member-name descriptors used to resolve declarative rule metadata

pub mod descriptor;
pub mod entity;
pub mod error;
pub mod identifiers;

pub use descriptor::ExpressionDescriptor;
pub use entity::Entity;
pub use error::CoreError;
pub use identifiers::{EntityKey, VersionToken};
