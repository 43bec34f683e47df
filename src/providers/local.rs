//! Local mailer for development and testing.
//!
//! Records messages in memory instead of sending them, so the full request
//! pipeline can run without a provider account.
//!
//! # Testing Usage
//!
//! ```rust,ignore
//! use email_relay::providers::LocalMailer;
//! use email_relay::testing::*;
//!
//! #[tokio::test]
//! async fn test_relays_email() {
//!     let mailer = LocalMailer::new();
//!     let app = router(AppState::with_mailer(mailer.clone()));
//!
//!     // ... POST a request through `app` ...
//!
//!     assert_message_sent(&mailer);
//!     assert_message_to(&mailer, "user@example.com");
//! }
//! ```

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::error::MailError;
use crate::mailer::{DeliveryResult, Mailer};
use crate::message::Message;

/// A message captured by [`LocalMailer`].
#[derive(Debug, Clone)]
pub struct StoredMessage {
    /// Identifier returned in the [`DeliveryResult`].
    pub id: String,
    pub message: Message,
}

/// Local mailer that records messages in memory.
///
/// Clones share the same storage, so a test can hand one clone to the
/// handler and inspect the other.
pub struct LocalMailer {
    storage: Arc<Mutex<Vec<StoredMessage>>>,
    /// If set, deliver() returns this error instead of recording.
    fail_with: RwLock<Option<MailError>>,
}

impl LocalMailer {
    /// Create a new local mailer with empty storage.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(Vec::new())),
            fail_with: RwLock::new(None),
        }
    }

    // =========================================================================
    // Failure Simulation (for testing)
    // =========================================================================

    /// Fail every delivery with a send error, like a dropped connection.
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.fail_with.write() = Some(MailError::SendError(message.into()));
    }

    /// Fail every delivery as if the provider answered with `status`.
    pub fn set_provider_failure(&self, status: u16, body: impl Into<String>) {
        *self.fail_with.write() = Some(MailError::provider("local", status, body));
    }

    /// Clear the failure state.
    pub fn clear_failure(&self) {
        *self.fail_with.write() = None;
    }

    // =========================================================================
    // Message Access (for testing assertions)
    // =========================================================================

    /// All recorded messages, oldest first.
    pub fn messages(&self) -> Vec<StoredMessage> {
        self.storage.lock().clone()
    }

    /// The most recently recorded message.
    pub fn last_message(&self) -> Option<StoredMessage> {
        self.storage.lock().last().cloned()
    }

    pub fn message_count(&self) -> usize {
        self.storage.lock().len()
    }

    pub fn has_messages(&self) -> bool {
        !self.storage.lock().is_empty()
    }

    /// Check if a message was sent to a specific address.
    pub fn sent_to(&self, address: &str) -> bool {
        self.storage
            .lock()
            .iter()
            .any(|stored| stored.message.recipient().eq_ignore_ascii_case(address))
    }

    /// Remove all recorded messages.
    pub fn clear(&self) {
        self.storage.lock().clear();
    }
}

impl Default for LocalMailer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LocalMailer {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            fail_with: RwLock::new(self.fail_with.read().clone()),
        }
    }
}

#[async_trait]
impl Mailer for LocalMailer {
    async fn deliver(&self, message: &Message) -> Result<DeliveryResult, MailError> {
        let failure = self.fail_with.read().clone();
        if let Some(err) = failure {
            return Err(err);
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.storage.lock().push(StoredMessage {
            id: id.clone(),
            message: message.clone(),
        });

        tracing::debug!(message_id = %id, to = %message.recipient(), "Message stored locally");

        Ok(DeliveryResult::new(id))
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> Message {
        Message::text_only("sender@example.com", to, "Test", "Hello")
    }

    #[tokio::test]
    async fn test_records_messages() {
        let mailer = LocalMailer::new();

        let result = mailer.deliver(&message("a@example.com")).await.unwrap();

        assert_eq!(mailer.message_count(), 1);
        assert_eq!(mailer.last_message().unwrap().id, result.message_id);
        assert!(mailer.sent_to("A@example.com"));
        assert!(!mailer.sent_to("b@example.com"));
    }

    #[tokio::test]
    async fn test_clone_shares_storage() {
        let mailer = LocalMailer::new();
        let cloned = mailer.clone();

        cloned.deliver(&message("a@example.com")).await.unwrap();
        mailer.deliver(&message("b@example.com")).await.unwrap();

        assert_eq!(mailer.message_count(), 2);
        assert_eq!(cloned.messages()[0].message.recipient(), "a@example.com");
    }

    #[tokio::test]
    async fn test_can_fail() {
        let mailer = LocalMailer::new();
        mailer.set_failure("connection refused");

        let err = mailer.deliver(&message("a@example.com")).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert!(!mailer.has_messages());

        mailer.clear_failure();
        assert!(mailer.deliver(&message("a@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_provider_failure_carries_status() {
        let mailer = LocalMailer::new();
        mailer.set_provider_failure(429, "slow down");

        let err = mailer.deliver(&message("a@example.com")).await.unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "local API error: status 429, body: slow down");
    }

    #[tokio::test]
    async fn test_clear() {
        let mailer = LocalMailer::new();
        mailer.deliver(&message("a@example.com")).await.unwrap();

        mailer.clear();
        assert_eq!(mailer.message_count(), 0);
        assert!(mailer.last_message().is_none());
    }
}
