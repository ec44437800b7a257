//! Strongly-typed identifiers for persisted entities
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidental mixing of identifier and version values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Identity of a persisted entity, assigned by the session on create
define_id!(EntityKey, "ENT");

/// Optimistic-concurrency version token
///
/// A commit succeeds only when the token supplied by the caller matches the
/// token stored alongside the row. Every successful commit advances the
/// token, so a writer holding a superseded token is rejected instead of
/// silently overwriting a newer version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(u64);

impl VersionToken {
    /// Token assigned to the first persisted version of an entity
    pub fn initial() -> Self {
        Self(1)
    }

    /// Creates a token from a raw counter value
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the token following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_key_display_and_parse() {
        let key = EntityKey::new();
        let shown = key.to_string();
        assert!(shown.starts_with("ENT-"));

        let parsed: EntityKey = shown.parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_entity_key_parse_without_prefix() {
        let key = EntityKey::new();
        let parsed: EntityKey = key.as_uuid().to_string().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_version_token_sequence() {
        let first = VersionToken::initial();
        assert_eq!(first.as_u64(), 1);

        let second = first.next();
        assert!(second > first);
        assert_eq!(second.as_u64(), 2);
    }

    #[test]
    fn test_version_token_display() {
        assert_eq!(VersionToken::from_raw(7).to_string(), "v7");
    }
}
