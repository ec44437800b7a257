//! Test Data Builders
//!
//! Builder for constructing `ContactCard` test data with sensible
//! defaults, letting tests specify only the members they care about.

use access_kernel::{EntityKey, VersionToken};

use crate::fixtures::ContactCard;

/// Builder for test contact cards
pub struct ContactCardBuilder {
    card: ContactCard,
}

impl Default for ContactCardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactCardBuilder {
    /// Creates a builder with valid default values
    pub fn new() -> Self {
        Self {
            card: ContactCard::new("Grace Hopper", "grace@example.com"),
        }
    }

    /// Sets the identity key, marking the card as already persisted
    pub fn with_key(mut self, key: EntityKey) -> Self {
        self.card.key = Some(key);
        self
    }

    /// Sets the version token
    pub fn with_version(mut self, version: VersionToken) -> Self {
        self.card.version = Some(version);
        self
    }

    /// Sets the display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.card.display_name = name.into();
        self
    }

    /// Sets the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.card.email = email.into();
        self
    }

    /// Sets the bio text
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.card.bio = bio.into();
        self
    }

    /// Sets the homepage
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.card.homepage = homepage.into();
        self
    }

    /// Finalizes the card
    pub fn build(self) -> ContactCard {
        self.card
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_are_valid() {
        let card = ContactCardBuilder::new().build();
        assert!(!card.display_name.is_empty());
        assert!(card.email.contains('@'));
        assert!(card.key.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let key = EntityKey::new();
        let card = ContactCardBuilder::new()
            .with_key(key)
            .with_version(VersionToken::initial())
            .with_display_name("Margaret Hamilton")
            .build();

        assert_eq!(card.key, Some(key));
        assert_eq!(card.version, Some(VersionToken::initial()));
        assert_eq!(card.display_name, "Margaret Hamilton");
    }
}
