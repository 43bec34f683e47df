//! HTTP surface: one handler behind every path.
//!
//! Pipeline per request:
//!
//! 1. `OPTIONS` → 204, no body.
//! 2. anything but `POST` → 405.
//! 3. decode the JSON body → 400 "Invalid request body" on failure.
//! 4. validate required fields → 400 with the first missing field.
//! 5. no provider configured → 500 "Email service not configured".
//! 6. deliver → 500 "Failed to send email: ..." on failure, 200 on success.
//!
//! Every response, including the 204, carries `Content-Type: application/json`
//! and the CORS headers.
//!
//! ```rust,ignore
//! use email_relay::{router, AppState, Config};
//!
//! let config = Config::from_env()?;
//! let app = router(AppState::from_config(&config));
//! ```

use std::sync::Arc;

use axum::{
    body,
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::RelayError;
use crate::mailer::{deliver_with, Mailer};
use crate::message::Message;
use crate::providers::SendGridMailer;
use crate::request::EmailRequest;
use crate::response::EmailResponse;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared state for the handler.
///
/// Immutable once built; the only thing shared between requests is the
/// provider client.
#[derive(Clone)]
pub struct AppState {
    mailer: Option<Arc<dyn Mailer>>,
    max_body_bytes: usize,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// Without an API key the state has no mailer and every send fails closed.
    pub fn from_config(config: &Config) -> Self {
        let mailer = config.sendgrid_api_key.as_ref().map(|key| {
            let mut sendgrid = SendGridMailer::new(key);
            if let Some(url) = &config.sendgrid_base_url {
                sendgrid = sendgrid.base_url(url);
            }
            Arc::new(sendgrid) as Arc<dyn Mailer>
        });

        Self::new(mailer).max_body_bytes(config.max_body_bytes)
    }

    /// Use a specific mailer.
    pub fn with_mailer<M: Mailer + 'static>(mailer: M) -> Self {
        Self::new(Some(Arc::new(mailer)))
    }

    /// State with no provider; every send answers "Email service not configured".
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    fn new(mailer: Option<Arc<dyn Mailer>>) -> Self {
        let mailer = mailer.filter(|m| match m.validate_config() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(provider = m.provider_name(), error = %e, "Ignoring misconfigured mailer");
                false
            }
        });

        if mailer.is_none() {
            tracing::warn!("No email provider configured; send requests will be rejected");
        }

        Self {
            mailer,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Set the largest request body accepted.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.mailer.is_some()
    }
}

/// Create the router. Every method on every path goes to [`send_email`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(send_email)
        .with_state(state)
        .layer(response_header(header::CONTENT_TYPE, "application/json"))
        .layer(response_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(response_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            "POST, OPTIONS",
        ))
        .layer(response_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type",
        ))
        .layer(TraceLayer::new_for_http())
}

fn response_header(
    name: HeaderName,
    value: &'static str,
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

enum Outcome {
    Preflight,
    Sent,
}

/// Handle one request.
pub async fn send_email(State(state): State<AppState>, request: Request) -> Response {
    match relay(&state, request).await {
        Ok(Outcome::Preflight) => StatusCode::NO_CONTENT.into_response(),
        Ok(Outcome::Sent) => (StatusCode::OK, Json(EmailResponse::sent())).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn relay(state: &AppState, request: Request) -> Result<Outcome, RelayError> {
    let method = request.method();
    if method == Method::OPTIONS {
        return Ok(Outcome::Preflight);
    }
    if method != Method::POST {
        tracing::debug!(%method, "Rejected method");
        return Err(RelayError::MethodNotAllowed);
    }

    let bytes = body::to_bytes(request.into_body(), state.max_body_bytes)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            RelayError::InvalidBody(e.to_string())
        })?;

    let email = EmailRequest::from_json(&bytes).map_err(|e| {
        tracing::warn!(error = %e, "Failed to decode request body");
        RelayError::InvalidBody(e.to_string())
    })?;

    if let Err(e) = email.validate() {
        tracing::warn!(error = %e, "Validation failed");
        return Err(e.into());
    }

    let Some(mailer) = state.mailer.as_deref() else {
        tracing::error!("SENDGRID_API_KEY is not set");
        return Err(RelayError::NotConfigured);
    };

    let message = Message::from(&email);
    deliver_with(&message, mailer).await?;

    tracing::info!(to = %email.to, "Email sent successfully");
    Ok(Outcome::Sent)
}
