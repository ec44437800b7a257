//! Property-based tests for sanitization invariants
//!
//! Idempotence is the load-bearing contract: applying a plan to values it
//! has already normalized must change nothing, for any input the plan
//! accepts.

use access_kernel::{Entity, EntityKey, VersionToken};
use domain_rules::SanitizePlan;
use proptest::prelude::*;

#[derive(Debug, Clone, Default)]
struct Snippet {
    key: Option<EntityKey>,
    version: Option<VersionToken>,
    text: String,
}

impl Entity for Snippet {
    fn entity_name() -> &'static str {
        "Snippet"
    }
    fn fields() -> &'static [&'static str] {
        &["text"]
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
        (name == "text").then_some(self.text.as_str())
    }
    fn set_text_field(&mut self, name: &str, value: String) -> bool {
        if name == "text" {
            self.text = value;
            true
        } else {
            false
        }
    }
}

fn plan() -> SanitizePlan {
    SanitizePlan::builder()
        .trim("text")
        .collapse_whitespace("text")
        .escape_markup("text")
        .bind::<Snippet>()
        .unwrap()
}

/// Printable text with spaces and markup characters, no control characters
fn printable_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            proptest::char::range('a', 'z'),
            proptest::char::range('A', 'Z'),
            proptest::char::range('0', '9'),
            Just(' '),
            Just('<'),
            Just('>'),
            Just('"'),
            Just('&'),
            Just('é'),
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(text in printable_text()) {
        let plan = plan();
        let mut snippet = Snippet { text, ..Default::default() };

        plan.apply(&mut snippet).unwrap();
        let first_pass = snippet.text.clone();

        plan.apply(&mut snippet).unwrap();
        prop_assert_eq!(snippet.text, first_pass);
    }

    #[test]
    fn sanitized_text_has_no_raw_markup(text in printable_text()) {
        let plan = plan();
        let mut snippet = Snippet { text, ..Default::default() };
        plan.apply(&mut snippet).unwrap();

        prop_assert!(!snippet.text.contains('<'));
        prop_assert!(!snippet.text.contains('>'));
        prop_assert!(!snippet.text.contains('"'));
        prop_assert!(!snippet.text.contains("  "));
    }

    #[test]
    fn empty_plan_never_changes_anything(text in printable_text()) {
        let plan = SanitizePlan::empty();
        let original = text.clone();
        let mut snippet = Snippet { text, ..Default::default() };

        plan.apply(&mut snippet).unwrap();
        prop_assert_eq!(snippet.text, original);
    }
}
