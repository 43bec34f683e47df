//! Mailer trait and delivery result types.
//!
//! # Why `async_trait`?
//!
//! The handler state stores the configured provider as `Arc<dyn Mailer>` so the
//! same router can run against SendGrid in production and [`LocalMailer`] in
//! tests. Native async trait methods are not object-safe, so the trait uses
//! `#[async_trait]`, which boxes the future. One allocation per delivery is
//! noise next to a network round trip to the provider.
//!
//! [`LocalMailer`]: crate::providers::LocalMailer

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

#[cfg(feature = "metrics")]
use std::time::Instant;

use crate::error::MailError;
use crate::message::Message;

/// Result of a successful email delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Message ID assigned by the provider
    pub message_id: String,
    /// Optional provider-specific response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

impl DeliveryResult {
    /// Create a new delivery result with just a message ID.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: None,
        }
    }

    /// Create a delivery result with provider response.
    pub fn with_response(message_id: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: Some(response),
        }
    }
}

/// Trait for email delivery providers.
///
/// # Example
///
/// ```ignore
/// use email_relay::{Mailer, Message};
/// use email_relay::providers::SendGridMailer;
///
/// let mailer = SendGridMailer::new("SG.xxxxx");
/// let message = Message::text_only("sender@example.com", "recipient@example.com", "Hello", "World");
///
/// let result = mailer.deliver(&message).await?;
/// println!("Sent with ID: {}", result.message_id);
/// ```
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single message.
    ///
    /// Makes exactly one attempt; retrying is left to the provider.
    async fn deliver(&self, message: &Message) -> Result<DeliveryResult, MailError>;

    /// Get the provider name (for logging/debugging).
    fn provider_name(&self) -> &'static str {
        "unknown"
    }

    /// Validate configuration.
    ///
    /// Called when the handler state is built. Override in providers that
    /// require specific config (API keys, etc.).
    fn validate_config(&self) -> Result<(), MailError> {
        Ok(())
    }
}

/// Deliver a message with a specific mailer, wrapped in a telemetry span.
///
/// ```rust,ignore
/// use email_relay::{deliver_with, Message};
/// use email_relay::providers::SendGridMailer;
///
/// let mailer = SendGridMailer::new("SG.xxxxx");
/// let message = Message::text_only("b@x.com", "a@x.com", "Hi", "Body");
///
/// deliver_with(&message, &mailer).await?;
/// ```
pub async fn deliver_with<M: Mailer + ?Sized>(
    message: &Message,
    mailer: &M,
) -> Result<DeliveryResult, MailError> {
    let provider = mailer.provider_name();

    let span = tracing::info_span!(
        "email_relay.deliver",
        provider = provider,
        to = %message.recipient(),
        subject = %message.subject(),
    );

    async move {
        tracing::debug!(has_html = message.has_html(), "Delivering email");

        #[cfg(feature = "metrics")]
        let start = Instant::now();

        let result = mailer.deliver(message).await;

        #[cfg(feature = "metrics")]
        {
            let duration = start.elapsed().as_secs_f64();
            let status = if result.is_ok() { "success" } else { "error" };
            metrics::counter!("email_relay_emails_total", "provider" => provider, "status" => status)
                .increment(1);
            metrics::histogram!("email_relay_delivery_duration_seconds", "provider" => provider)
                .record(duration);
        }

        match &result {
            Ok(r) => tracing::info!(message_id = %r.message_id, "Email delivered"),
            Err(e) => tracing::error!(error = %e, "Email delivery failed"),
        }

        result
    }
    .instrument(span)
    .await
}
