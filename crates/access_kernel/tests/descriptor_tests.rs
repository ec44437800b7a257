//! Tests for access_kernel descriptors and errors

use access_kernel::{CoreError, ExpressionDescriptor};

const DECLARED: &[&str] = &["title", "body", "author"];

#[test]
fn test_descriptor_round_trip_through_serde() {
    let descriptor = ExpressionDescriptor::resolve("body", DECLARED);
    let json = serde_json::to_string(&descriptor).unwrap();
    let back: ExpressionDescriptor = serde_json::from_str(&json).unwrap();

    assert_eq!(back, descriptor);
    assert!(back.is_valid());
}

#[test]
fn test_descriptor_invalid_when_member_removed_from_declaration() {
    // A descriptor resolved against one declaration does not become valid
    // for another; validity is fixed at resolution time.
    let descriptor = ExpressionDescriptor::resolve("title", &["title"]);
    assert!(descriptor.is_valid());

    let stale = ExpressionDescriptor::resolve("title", &["body"]);
    assert!(!stale.is_valid());
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("rule references nothing");

    match error {
        CoreError::Configuration(msg) => assert!(msg.contains("references")),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_unknown_member() {
    let error = CoreError::unknown_member("Note", "subtitle");
    assert!(error.is_configuration());

    let display = format!("{}", error);
    assert!(display.contains("subtitle"));
    assert!(display.contains("Note"));
}

#[test]
fn test_core_error_invalid_state_is_not_configuration() {
    let error = CoreError::invalid_state("repository already closed");
    assert!(!error.is_configuration());
}
