//! Error types for email-relay.
//!
//! Two layers:
//!
//! - [`MailError`] is what a [`Mailer`](crate::Mailer) returns when delivery fails.
//! - [`RelayError`] is what the request pipeline returns. It knows its HTTP
//!   status and renders itself as an [`EmailResponse`] failure envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::EmailResponse;

/// Errors that can occur when delivering an email to a provider.
#[derive(Debug, Clone, Error)]
pub enum MailError {
    /// Email provider is not configured.
    #[error("Email provider not configured")]
    NotConfigured,

    /// Configuration error (missing env var, invalid value, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The HTTP request to the provider failed before a response arrived.
    #[error("{provider} client error: {message}")]
    Http {
        provider: &'static str,
        message: String,
    },

    /// Error sending the email (non-HTTP mailers).
    #[error("Send error: {0}")]
    SendError(String),

    /// The provider answered with an error status.
    #[error("{provider} API error: status {status}, body: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        /// Raw response body, kept for operator diagnosis.
        body: String,
    },
}

impl MailError {
    /// Create a transport error for a provider.
    pub fn http(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Http {
            provider,
            message: message.into(),
        }
    }

    /// Create a provider error with HTTP status and response body.
    pub fn provider(provider: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            status,
            body: body.into(),
        }
    }

    /// HTTP status reported by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A required field of an [`EmailRequest`](crate::EmailRequest) is missing.
///
/// Variants are checked in declaration order; the first one that applies is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'to' field is required")]
    MissingTo,

    #[error("'from' field is required")]
    MissingFrom,

    #[error("'subject' field is required")]
    MissingSubject,

    #[error("either 'text_content' or 'html_content' is required")]
    MissingContent,
}

/// Errors that end a request early.
///
/// The `Display` output is exactly what ends up in the `error` field of the
/// response, so internal detail (decode errors) is kept out of it.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Only POST method is allowed")]
    MethodNotAllowed,

    /// The body could not be read or decoded. The detail is for logs only.
    #[error("Invalid request body")]
    InvalidBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    Delivery(#[from] MailError),
}

impl RelayError {
    /// HTTP status for this failure class.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidBody(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(EmailResponse::failure(self.to_string())),
        )
            .into_response()
    }
}
