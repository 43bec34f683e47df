//! SendGrid adapter tests.

use email_relay::providers::SendGridMailer;
use email_relay::{MailError, Mailer, Message};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn text_message() -> Message {
    Message::text_only(
        "tony.stark@example.com",
        "steve.rogers@example.com",
        "Hello, Avengers!",
        "Hello",
    )
}

fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(202).insert_header("X-Message-Id", "123-xyz")
}

// ============================================================================
// Basic Delivery Tests
// ============================================================================

#[tokio::test]
async fn text_only_delivery_returns_ok() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .and(header("Authorization", "Bearer SG.test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "personalizations": [{"to": [{"email": "steve.rogers@example.com"}]}],
            "from": {"email": "tony.stark@example.com"},
            "subject": "Hello, Avengers!",
            "content": [{"type": "text/plain", "value": "Hello"}]
        })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let result = mailer.deliver(&text_message()).await;
    assert!(result.is_ok(), "Expected Ok, got: {:?}", result);
    assert_eq!(result.unwrap().message_id, "123-xyz");
}

#[tokio::test]
async fn html_with_fallback_delivery_returns_ok() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    let message = Message::html_with_fallback(
        "tony.stark@example.com",
        "steve.rogers@example.com",
        "Hello, Avengers!",
        "Hello",
        "<h1>Hello</h1>",
    );

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .and(body_json(json!({
            "personalizations": [{"to": [{"email": "steve.rogers@example.com"}]}],
            "from": {"email": "tony.stark@example.com"},
            "subject": "Hello, Avengers!",
            "content": [
                {"type": "text/plain", "value": "Hello"},
                {"type": "text/html", "value": "<h1>Hello</h1>"}
            ]
        })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    assert!(mailer.deliver(&message).await.is_ok());
}

#[tokio::test]
async fn html_only_delivery_omits_text_part() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    let message = Message::html_with_fallback(
        "tony.stark@example.com",
        "steve.rogers@example.com",
        "Hello, Avengers!",
        "",
        "<h1>Hello</h1>",
    );

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .and(body_json(json!({
            "personalizations": [{"to": [{"email": "steve.rogers@example.com"}]}],
            "from": {"email": "tony.stark@example.com"},
            "subject": "Hello, Avengers!",
            "content": [{"type": "text/html", "value": "<h1>Hello</h1>"}]
        })))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    assert!(mailer.deliver(&message).await.is_ok());
}

#[tokio::test]
async fn missing_message_id_header_generates_one() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let result = mailer.deliver(&text_message()).await.unwrap();
    assert!(!result.message_id.is_empty());
    assert_eq!(
        result.provider_response,
        Some(json!({"provider": "sendgrid", "status": 202}))
    );
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn rate_limited_returns_status_and_body() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "errors": [{"message": "too many requests", "field": null, "help": null}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&text_message()).await.unwrap_err();
    match &err {
        MailError::Provider {
            provider,
            status,
            body,
        } => {
            assert_eq!(*provider, "sendgrid");
            assert_eq!(*status, 429);
            assert!(body.contains("too many requests"));
        }
        other => panic!("Expected ProviderError, got {:?}", other),
    }
    assert!(err.to_string().starts_with("sendgrid API error: status 429, body: "));
}

#[tokio::test]
async fn unauthorized_returns_error() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.wrong").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(401).set_body_string("permission denied"))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&text_message()).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("permission denied"));
}

#[tokio::test]
async fn server_error_with_empty_body_returns_error() {
    let server = MockServer::start().await;
    let mailer = SendGridMailer::new("SG.test-api-key").base_url(server.uri());

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = mailer.deliver(&text_message()).await.unwrap_err();
    assert_eq!(err.to_string(), "sendgrid API error: status 500, body: ");
}

#[tokio::test]
async fn unreachable_server_returns_client_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mailer = SendGridMailer::new("SG.test-api-key").base_url(format!("http://{addr}"));

    let err = mailer.deliver(&text_message()).await.unwrap_err();
    assert!(matches!(err, MailError::Http { provider: "sendgrid", .. }));
    assert!(err.to_string().starts_with("sendgrid client error: "));
    assert_eq!(err.status(), None);
}

// ============================================================================
// Provider Name Test
// ============================================================================

#[test]
fn provider_name_returns_sendgrid() {
    let mailer = SendGridMailer::new("SG.test-api-key");
    assert_eq!(mailer.provider_name(), "sendgrid");
}
