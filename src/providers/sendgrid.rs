//! SendGrid API provider.
//!
//! Sends through the v3 Mail Send endpoint with a single personalization per
//! message.
//!
//! # Example
//!
//! ```rust,ignore
//! use email_relay::providers::SendGridMailer;
//!
//! let mailer = SendGridMailer::new("SG.xxxxx");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::MailError;
use crate::mailer::{DeliveryResult, Mailer};
use crate::message::Message;

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3";

/// SendGrid API email provider.
///
/// No request timeout is set here; pass a configured client through
/// [`with_client`](Self::with_client) to add one.
#[derive(Clone)]
pub struct SendGridMailer {
    api_key: String,
    client: Client,
    base_url: String,
}

impl SendGridMailer {
    /// Create a new SendGrid mailer with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(api_key, Client::new())
    }

    /// Create with a custom reqwest client.
    pub fn with_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            base_url: SENDGRID_API_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn build_request(message: &Message) -> SendGridRequest<'_> {
        // Empty parts are left out; SendGrid rejects content with an empty value.
        let content = [("text/plain", message.text()), ("text/html", message.html())]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(content_type, value)| SendGridContent {
                content_type,
                value,
            })
            .collect();

        SendGridRequest {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridAddress {
                    email: message.recipient(),
                }],
            }],
            from: SendGridAddress {
                email: message.sender(),
            },
            subject: message.subject(),
            content,
        }
    }
}

impl std::fmt::Debug for SendGridMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridMailer")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn deliver(&self, message: &Message) -> Result<DeliveryResult, MailError> {
        let request = Self::build_request(message);
        let url = format!("{}/mail/send", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("User-Agent", format!("email-relay/{}", crate::VERSION))
            .json(&request)
            .send()
            .await
            .map_err(|e| MailError::http("sendgrid", e.to_string()))?;

        let status = response.status();

        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::provider("sendgrid", status.as_u16(), body));
        }

        // SendGrid returns 202 Accepted with an empty body on success
        let message_id = response
            .headers()
            .get("X-Message-Id")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(DeliveryResult::with_response(
            message_id,
            serde_json::json!({ "provider": "sendgrid", "status": status.as_u16() }),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "sendgrid"
    }

    fn validate_config(&self) -> Result<(), MailError> {
        if self.api_key.trim().is_empty() {
            return Err(MailError::NotConfigured);
        }
        Ok(())
    }
}

// ============================================================================
// SendGrid API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct SendGridRequest<'a> {
    personalizations: Vec<SendGridPersonalization<'a>>,
    from: SendGridAddress<'a>,
    subject: &'a str,
    content: Vec<SendGridContent<'a>>,
}

#[derive(Debug, Serialize)]
struct SendGridPersonalization<'a> {
    to: Vec<SendGridAddress<'a>>,
}

#[derive(Debug, Serialize)]
struct SendGridAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct SendGridContent<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}
