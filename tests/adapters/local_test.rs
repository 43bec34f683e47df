//! Local adapter tests.

use email_relay::providers::LocalMailer;
use email_relay::{deliver_with, Mailer, Message};

fn message(to: &str) -> Message {
    Message::text_only("tony.stark@example.com", to, "Hello, Avengers!", "Hello!")
}

#[tokio::test]
async fn deliver_returns_ok() {
    let mailer = LocalMailer::new();

    let result = mailer.deliver(&message("steve.rogers@example.com")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn captures_sent_messages_in_order() {
    let mailer = LocalMailer::new();

    mailer
        .deliver(&message("steve.rogers@example.com"))
        .await
        .unwrap();
    mailer
        .deliver(&message("natasha.romanoff@example.com"))
        .await
        .unwrap();

    let messages = mailer.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message.recipient(), "steve.rogers@example.com");
    assert_eq!(
        mailer.last_message().unwrap().message.recipient(),
        "natasha.romanoff@example.com"
    );
}

#[tokio::test]
async fn deliver_with_records_through_span() {
    let mailer = LocalMailer::new();

    let result = deliver_with(&message("steve.rogers@example.com"), &mailer)
        .await
        .unwrap();

    assert_eq!(mailer.last_message().unwrap().id, result.message_id);
}

#[tokio::test]
async fn failure_is_not_recorded() {
    let mailer = LocalMailer::new();
    mailer.set_provider_failure(500, "boom");

    assert!(mailer
        .deliver(&message("steve.rogers@example.com"))
        .await
        .is_err());
    assert_eq!(mailer.message_count(), 0);
}

#[test]
fn provider_name_returns_local() {
    assert_eq!(LocalMailer::new().provider_name(), "local");
}
