//! Mailer trait and SMTP implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

use super::{MailError, OutgoingEmail};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Async email sending trait.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// SMTP-based mailer using lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer from configuration.
    ///
    /// Fails with [`MailError::MissingConfig`] unless both the account and
    /// password are set.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let (Some(username), Some(password)) = (
            config.username.as_deref().filter(|u| !u.trim().is_empty()),
            config.password.as_deref().filter(|p| !p.trim().is_empty()),
        ) else {
            return Err(MailError::MissingConfig(
                "mail.username and mail.password".to_string(),
            ));
        };

        let from = sender_mailbox(username, config.from_name.as_deref())?;

        let builder = match config.tls.as_str() {
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host),
            "starttls" => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
            _ => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
        };

        let transport = builder
            .port(config.smtp_port)
            .timeout(Some(SMTP_TIMEOUT))
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self {
            transport: Arc::new(transport),
            from,
        })
    }
}

fn sender_mailbox(username: &str, display_name: Option<&str>) -> Result<Mailbox, MailError> {
    let address: Address = username
        .parse()
        .map_err(|_| MailError::InvalidAddress(username.to_string()))?;
    let name = display_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    Ok(Mailbox::new(name, address))
}

/// Build a multipart/alternative message (plain-text fallback + HTML).
pub(crate) fn build_message(from: &Mailbox, email: &OutgoingEmail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(from.clone())
        .subject(email.subject.as_str());

    for to in &email.to {
        let mailbox: Mailbox = to
            .parse()
            .map_err(|_| MailError::InvalidAddress(to.clone()))?;
        builder = builder.to(mailbox);
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html.clone()),
                ),
        )
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(&self.from, email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        tracing::info!(
            recipients = email.to.len(),
            subject = %email.subject,
            "Email sent"
        );
        Ok(())
    }
}
