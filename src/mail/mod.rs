//! Newsletter delivery over SMTP.
//!
//! A thin layer over [lettre](https://lettre.rs). Handlers validate a
//! [`SendEmailRequest`] into an [`OutgoingEmail`] and hand it to a
//! [`Mailer`]; the production mailer is [`SmtpMailer`].
//!
//! # Configuration
//!
//! | Variable | Config key | Description |
//! |----------|------------|-------------|
//! | `GMAIL_USER` | `mail.username` | Account, also the sender address |
//! | `GMAIL_PASSWORD` | `mail.password` | Account (app) password |
//! | `SMTP_HOST` | `mail.smtp_host` | Relay host (default: smtp.gmail.com) |
//! | `SMTP_PORT` | `mail.smtp_port` | Relay port (default: 465) |

mod mailer;

pub use mailer::{Mailer, SmtpMailer};

use serde::Deserialize;
use thiserror::Error;

/// Plain-text part sent alongside the HTML body.
pub const FALLBACK_TEXT: &str = "This is a fallback for email clients that do not support HTML.";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("missing required config: {0}")]
    MissingConfig(String),

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Recipients as sent by the composition UI: a list or one
/// comma-separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    List(Vec<String>),
    Text(String),
}

impl Recipients {
    /// Individual trimmed, non-empty addresses.
    pub fn addresses(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Recipients::List(list) => list.iter().flat_map(|s| s.split(',')).collect(),
            Recipients::Text(text) => text.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body of `POST /send-email`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub recipients: Option<Recipients>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// A validated message ready for a [`Mailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl SendEmailRequest {
    /// Validate required fields, returning `None` if any is missing or empty.
    pub fn into_email(self) -> Option<OutgoingEmail> {
        let to = self.recipients.map(|r| r.addresses()).unwrap_or_default();
        let subject = self.subject.filter(|s| !s.trim().is_empty())?;
        let html = self.html.filter(|h| !h.trim().is_empty())?;
        if to.is_empty() {
            return None;
        }

        Some(OutgoingEmail {
            to,
            subject,
            html,
            text: FALLBACK_TEXT.to_string(),
        })
    }
}
