//! Testing utilities and assertion helpers.
//!
//! # Example
//!
//! ```rust,ignore
//! use email_relay::providers::LocalMailer;
//! use email_relay::testing::*;
//!
//! #[tokio::test]
//! async fn test_relay() {
//!     let mailer = LocalMailer::new();
//!
//!     // ... drive the handler ...
//!
//!     assert_message_sent(&mailer);
//!     assert_message_to(&mailer, "user@example.com");
//!     assert_message_subject(&mailer, "Welcome");
//! }
//! ```

use crate::providers::{LocalMailer, StoredMessage};

/// Format recorded messages for panic output.
fn format_summary(messages: &[StoredMessage]) -> String {
    if messages.is_empty() {
        return "  (no messages sent)".to_string();
    }

    messages
        .iter()
        .enumerate()
        .map(|(i, stored)| {
            let m = &stored.message;
            format!(
                "  {}. To: {}, From: {}, Subject: \"{}\"",
                i + 1,
                m.recipient(),
                m.sender(),
                m.subject()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert that at least one message was sent.
///
/// # Panics
///
/// Panics if nothing was sent.
pub fn assert_message_sent(mailer: &LocalMailer) {
    if !mailer.has_messages() {
        panic!("Expected a message to be sent, but none were");
    }
}

/// Assert that no message was sent.
///
/// # Panics
///
/// Panics if anything was sent, listing what was.
pub fn assert_no_message_sent(mailer: &LocalMailer) {
    let messages = mailer.messages();
    if !messages.is_empty() {
        panic!(
            "Expected no messages to be sent, but {} were:\n{}",
            messages.len(),
            format_summary(&messages)
        );
    }
}

/// Assert that a message was sent to the given address.
///
/// # Panics
///
/// Panics if no recorded message has that recipient.
pub fn assert_message_to(mailer: &LocalMailer, address: &str) {
    if !mailer.sent_to(address) {
        panic!(
            "Expected a message to {}, but found:\n{}",
            address,
            format_summary(&mailer.messages())
        );
    }
}

/// Assert that a message with exactly this subject was sent.
///
/// # Panics
///
/// Panics if no recorded message has that subject.
pub fn assert_message_subject(mailer: &LocalMailer, subject: &str) {
    let messages = mailer.messages();
    if !messages.iter().any(|s| s.message.subject() == subject) {
        panic!(
            "Expected a message with subject \"{}\", but found:\n{}",
            subject,
            format_summary(&messages)
        );
    }
}
