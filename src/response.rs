//! Response envelope returned to callers.

use serde::{Deserialize, Serialize};

/// Summary written to the caller for every request that has a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResponse {
    pub success: bool,
    pub message: String,
    /// Only present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmailResponse {
    /// The email was accepted by the provider.
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Email sent successfully".to_string(),
            error: None,
        }
    }

    /// The request failed; `error` says why.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: "Failed to send email".to_string(),
            error: Some(error.into()),
        }
    }
}
