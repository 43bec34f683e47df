//! Inbound email request.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ValidationError;

/// An email the caller wants sent.
///
/// Decoding is lenient about shape and strict about content: absent or `null`
/// fields decode as empty and are rejected later by [`validate`](Self::validate).
///
/// ```
/// use email_relay::EmailRequest;
///
/// let req = EmailRequest::from_json(br#"{"to":"a@x.com","from":"b@x.com","subject":"Hi","text_content":"Body"}"#).unwrap();
/// assert!(req.validate().is_ok());
/// assert_eq!(req.text(), "Body");
/// assert_eq!(req.html(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmailRequest {
    /// Recipient address
    #[serde(deserialize_with = "null_as_empty")]
    pub to: String,
    /// Sender address
    #[serde(deserialize_with = "null_as_empty")]
    pub from: String,
    /// Subject line
    #[serde(deserialize_with = "null_as_empty")]
    pub subject: String,
    /// Plain text body
    pub text_content: Option<String>,
    /// HTML body
    pub html_content: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl EmailRequest {
    /// Decode a request body.
    ///
    /// Only the first JSON value is read; anything after it is ignored.
    /// A literal `null` body decodes as an empty request.
    ///
    /// Keys are matched exactly: `"To"` is an unknown field, not `to`.
    /// Strings must be valid UTF-8 after unescaping; bad bytes or lone
    /// surrogate escapes fail the decode instead of being replaced.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_slice(body);
        match Value::deserialize(&mut deserializer)? {
            Value::Null => Ok(Self::default()),
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Err(de::Error::custom(format!(
                "expected a JSON object, found {other}"
            ))),
        }
    }

    /// Check required fields, reporting the first one missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.to.is_empty() {
            return Err(ValidationError::MissingTo);
        }
        if self.from.is_empty() {
            return Err(ValidationError::MissingFrom);
        }
        if self.subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        if self.text().is_empty() && self.html().is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(())
    }

    /// Plain text body, empty if not provided.
    pub fn text(&self) -> &str {
        self.text_content.as_deref().unwrap_or_default()
    }

    /// HTML body, empty if not provided.
    pub fn html(&self) -> &str {
        self.html_content.as_deref().unwrap_or_default()
    }
}
