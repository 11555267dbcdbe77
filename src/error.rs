//! Unified error type for plexletter.
//!
//! Route handlers and the CLI funnel their failures into [`Error`], which
//! carries enough context to derive an HTTP status code via
//! [`Error::http_status`].

use crate::mail::MailError;

/// Failure modes surfaced past a component boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required request field was absent or empty.
    #[error("{0}")]
    MissingInput(String),

    /// Credentials or keys needed for the operation are not configured.
    #[error("{0}")]
    NotConfigured(String),

    /// An upstream provider call failed or returned malformed data.
    #[error("An unexpected error occurred: {provider}: {message}")]
    Upstream {
        /// Provider that failed (e.g. "tmdb").
        provider: String,
        /// Human-readable error description.
        message: String,
    },

    /// Building the newsletter HTML failed.
    #[error("Failed to generate HTML: {0}")]
    Generate(String),

    /// The mail transport rejected or failed to deliver the message.
    #[error("Failed to send email: {source}")]
    Mail {
        #[from]
        source: MailError,
    },
}

impl Error {
    /// Map this error to an HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::MissingInput(_) => 400,
            Error::NotConfigured(_) => 500,
            Error::Upstream { .. } => 500,
            Error::Generate(_) => 500,
            Error::Mail { .. } => 500,
        }
    }

    /// Short machine-readable code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingInput(_) => "missing_input",
            Error::NotConfigured(_) => "not_configured",
            Error::Upstream { .. } => "upstream_error",
            Error::Generate(_) => "generate_error",
            Error::Mail { .. } => "mail_error",
        }
    }

    /// Convenience constructor for [`Error::Upstream`].
    pub fn upstream(provider: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Upstream {
            provider: provider.into(),
            message: err.to_string(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
