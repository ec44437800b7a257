//! Property-Based Test Generators
//!
//! Proptest strategies for generating contact-card member text with the
//! characteristics the policy pipeline cares about: printable content,
//! stray whitespace, and markup-significant characters.

use proptest::prelude::*;

use crate::fixtures::ContactCard;

/// Printable text without control characters
pub fn printable_text(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            proptest::char::range('a', 'z'),
            proptest::char::range('A', 'Z'),
            proptest::char::range('0', '9'),
            Just(' '),
        ],
        0..max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Printable text padded with leading/trailing whitespace
pub fn padded_text(max_len: usize) -> impl Strategy<Value = String> {
    (printable_text(max_len), 0usize..4, 0usize..4)
        .prop_map(|(core, left, right)| format!("{}{}{}", " ".repeat(left), core, " ".repeat(right)))
}

/// Text that may carry markup-significant characters
pub fn markup_text(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            proptest::char::range('a', 'z'),
            Just(' '),
            Just('<'),
            Just('>'),
            Just('"'),
            Just('&'),
        ],
        0..max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for well-formed email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,12}", "[a-z]{1,12}", "[a-z]{2,4}")
        .prop_map(|(user, host, tld)| format!("{user}@{host}.{tld}"))
}

/// Strategy for contact cards that pass the standard rule set
pub fn valid_card_strategy() -> impl Strategy<Value = ContactCard> {
    ("[A-Za-z]{1,40}", email_strategy(), markup_text(80)).prop_map(|(name, email, bio)| {
        ContactCard {
            display_name: name,
            email,
            bio,
            ..Default::default()
        }
    })
}
