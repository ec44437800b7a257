//! Test Fixtures
//!
//! The `ContactCard` sample entity used across the test suite, plus
//! pre-built instances for common scenarios. The card carries the kinds
//! of members the policy pipeline exists for: a required display name,
//! a pattern-checked email, and free text a caller might fill with
//! markup or stray whitespace.

use access_kernel::{Entity, EntityKey, VersionToken};
use domain_rules::{RuleSetBuilder, SanitizePlanBuilder};

/// Sample entity for exercising the repository stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCard {
    pub key: Option<EntityKey>,
    pub version: Option<VersionToken>,
    pub display_name: String,
    pub email: String,
    pub bio: String,
    pub homepage: String,
}

impl ContactCard {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

impl Entity for ContactCard {
    fn entity_name() -> &'static str {
        "ContactCard"
    }

    fn fields() -> &'static [&'static str] {
        &["display_name", "email", "bio", "homepage"]
    }

    fn key(&self) -> Option<EntityKey> {
        self.key
    }

    fn assign_key(&mut self, key: EntityKey) {
        self.key = Some(key);
    }

    fn version(&self) -> Option<VersionToken> {
        self.version
    }

    fn set_version(&mut self, version: VersionToken) {
        self.version = Some(version);
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "display_name" => Some(&self.display_name),
            "email" => Some(&self.email),
            "bio" => Some(&self.bio),
            "homepage" => Some(&self.homepage),
            _ => None,
        }
    }

    fn set_text_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "display_name" => self.display_name = value,
            "email" => self.email = value,
            "bio" => self.bio = value,
            "homepage" => self.homepage = value,
            _ => return false,
        }
        true
    }
}

/// Pre-built contact cards for common scenarios
pub struct CardFixtures;

impl CardFixtures {
    /// A card that passes the standard rule set unchanged
    pub fn valid() -> ContactCard {
        ContactCard::new("Ada Lovelace", "ada@example.com")
    }

    /// A card with a blank required member
    pub fn missing_display_name() -> ContactCard {
        ContactCard::new("   ", "ada@example.com")
    }

    /// A card whose members need every sanitize action
    pub fn messy() -> ContactCard {
        ContactCard {
            display_name: "  Ada   Lovelace  ".to_string(),
            email: "ada@example.com".to_string(),
            bio: r#"<b>First</b> "programmer""#.to_string(),
            homepage: " https://example.com ".to_string(),
            ..Default::default()
        }
    }
}

/// The rule metadata the suite binds to `ContactCard`
pub fn standard_rules() -> RuleSetBuilder {
    domain_rules::RuleSet::builder()
        .required("display_name")
        .max_length("display_name", 120)
        .required("email")
        .pattern("email", r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .max_length("bio", 500)
}

/// The sanitize metadata the suite binds to `ContactCard`
pub fn standard_sanitizer() -> SanitizePlanBuilder {
    domain_rules::SanitizePlan::builder()
        .trim("display_name")
        .collapse_whitespace("display_name")
        .trim("email")
        .trim("homepage")
        .escape_markup("bio")
}
