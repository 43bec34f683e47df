//! Outbound message handed to a [`Mailer`](crate::Mailer).

use crate::request::EmailRequest;

/// A single-recipient email ready for delivery.
///
/// Addresses are raw strings; no display name is attached.
///
/// ```
/// use email_relay::{EmailRequest, Message};
///
/// let req = EmailRequest {
///     to: "a@x.com".into(),
///     from: "b@x.com".into(),
///     subject: "Hi".into(),
///     html_content: Some("<p>Hi</p>".into()),
///     ..Default::default()
/// };
///
/// let message = Message::from(&req);
/// assert_eq!(message.html(), "<p>Hi</p>");
/// assert_eq!(message.text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Plain text body only.
    TextOnly {
        from: String,
        to: String,
        subject: String,
        text: String,
    },
    /// HTML body with a plain text alternative, which may be empty.
    HtmlWithFallback {
        from: String,
        to: String,
        subject: String,
        text: String,
        html: String,
    },
}

impl Message {
    /// Create a plain text message.
    pub fn text_only(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::TextOnly {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
        }
    }

    /// Create an HTML message with a plain text alternative.
    pub fn html_with_fallback(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self::HtmlWithFallback {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            html: html.into(),
        }
    }

    /// Sender address.
    pub fn sender(&self) -> &str {
        match self {
            Self::TextOnly { from, .. } | Self::HtmlWithFallback { from, .. } => from,
        }
    }

    /// Recipient address.
    pub fn recipient(&self) -> &str {
        match self {
            Self::TextOnly { to, .. } | Self::HtmlWithFallback { to, .. } => to,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            Self::TextOnly { subject, .. } | Self::HtmlWithFallback { subject, .. } => subject,
        }
    }

    /// Plain text body, possibly empty.
    pub fn text(&self) -> &str {
        match self {
            Self::TextOnly { text, .. } | Self::HtmlWithFallback { text, .. } => text,
        }
    }

    /// HTML body, empty for [`Message::TextOnly`].
    pub fn html(&self) -> &str {
        match self {
            Self::TextOnly { .. } => "",
            Self::HtmlWithFallback { html, .. } => html,
        }
    }

    pub fn has_html(&self) -> bool {
        matches!(self, Self::HtmlWithFallback { .. })
    }
}

impl From<&EmailRequest> for Message {
    fn from(req: &EmailRequest) -> Self {
        if req.html().is_empty() {
            Self::text_only(&req.from, &req.to, &req.subject, req.text())
        } else {
            Self::html_with_fallback(&req.from, &req.to, &req.subject, req.text(), req.html())
        }
    }
}
