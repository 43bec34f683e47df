//! # email-relay
//!
//! A single-endpoint HTTP handler that takes a JSON email request, checks the
//! required fields and hands the message to SendGrid.
//!
//! ## Request
//!
//! ```json
//! {
//!   "to": "user@example.com",
//!   "from": "noreply@example.com",
//!   "subject": "Welcome!",
//!   "text_content": "Hello",
//!   "html_content": "<p>Hello</p>"
//! }
//! ```
//!
//! `to`, `from` and `subject` are required, plus at least one of
//! `text_content` / `html_content`.
//!
//! ## Response
//!
//! | Case | Status | Body |
//! |------|--------|------|
//! | Sent | 200 | `{"success":true,"message":"Email sent successfully"}` |
//! | Preflight (`OPTIONS`) | 204 | empty |
//! | Bad JSON / missing field | 400 | `{"success":false,"message":"Failed to send email","error":"..."}` |
//! | Wrong method | 405 | same shape, `"Only POST method is allowed"` |
//! | No API key | 500 | same shape, `"Email service not configured"` |
//! | Provider failure | 500 | same shape, error includes provider status and body |
//!
//! ## Embedding
//!
//! ```rust,ignore
//! use email_relay::{router, AppState, Config};
//!
//! let config = Config::from_env()?;
//! let app = router(AppState::from_config(&config));
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Feature Flags
//!
//! - `metrics` - Prometheus-style metrics (counters/histograms)
//!
//! ## Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `email_relay_emails_total` | Counter | provider, status | Delivery attempts |
//! | `email_relay_delivery_duration_seconds` | Histogram | provider | Delivery duration |

/// The version of the email-relay crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod error;
mod handler;
mod mailer;
mod message;
mod request;
mod response;

pub mod providers;
pub mod testing;

pub use config::Config;
pub use error::{MailError, RelayError, ValidationError};
pub use handler::{router, send_email, AppState};
pub use mailer::{deliver_with, DeliveryResult, Mailer};
pub use message::Message;
pub use request::EmailRequest;
pub use response::EmailResponse;

/// Re-exports of the HTTP types used by the router, for tests and embedders.
pub mod reexports {
    pub use axum::body::Body;
    pub use axum::http::{header, Method, Request, StatusCode};
    pub use axum::Router;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        deliver_with, router, AppState, Config, DeliveryResult, EmailRequest, EmailResponse,
        MailError, Mailer, Message, RelayError,
    };
}
