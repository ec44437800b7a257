//! Core error types used across the repository stack

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown member '{member}' on entity '{entity}'")]
    UnknownMember { entity: String, member: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    pub fn unknown_member(entity: impl Into<String>, member: impl Into<String>) -> Self {
        CoreError::UnknownMember {
            entity: entity.into(),
            member: member.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        CoreError::InvalidState(message.into())
    }

    /// Returns true if this error reflects malformed rule metadata
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CoreError::Configuration(_) | CoreError::UnknownMember { .. }
        )
    }
}
