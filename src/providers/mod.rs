//! Email provider implementations.
//!
//! Each provider implements the [`Mailer`](crate::Mailer) trait.
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`SendGridMailer`] | SendGrid v3 Mail Send API |
//! | [`LocalMailer`] | In-memory recording for dev/testing |

mod sendgrid;
pub use sendgrid::SendGridMailer;

mod local;
pub use local::{LocalMailer, StoredMessage};
