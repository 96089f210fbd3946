// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async SMTP transport built from `[smtp]` configuration.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use finbell_config::model::SmtpConfig;
use finbell_core::types::RenderedEmail;
use finbell_core::{FinbellError, MailSender};

/// Sends rendered reminder emails over SMTP.
///
/// The transport is built once at startup; connections are pooled by lettre
/// and reused across a batch run.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer from the `[smtp]` section.
    ///
    /// With `starttls = true` the connection is upgraded after EHLO;
    /// otherwise it stays plaintext, which only makes sense for local
    /// relays and test servers.
    pub fn new(config: &SmtpConfig) -> Result<Self, FinbellError> {
        let from = config.from.parse::<Mailbox>().map_err(|e| FinbellError::Mail {
            message: format!("invalid smtp.from mailbox `{}`", config.from),
            source: Some(Box::new(e)),
        })?;

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host).map_err(|e| {
                FinbellError::Mail {
                    message: format!("cannot configure STARTTLS relay for `{}`", config.host),
                    source: Some(Box::new(e)),
                }
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Assemble the multipart message for one recipient.
    fn build_message(&self, to: &str, email: &RenderedEmail) -> Result<Message, FinbellError> {
        let to_mailbox = to.parse::<Mailbox>().map_err(|e| FinbellError::Mail {
            message: format!("invalid recipient address `{to}`"),
            source: Some(Box::new(e)),
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| FinbellError::Mail {
                message: format!("failed to assemble message for `{to}`"),
                source: Some(Box::new(e)),
            })
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, to: &str, email: &RenderedEmail) -> Result<(), FinbellError> {
        let message = self.build_message(to, email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| FinbellError::Mail {
                message: format!("SMTP delivery to `{to}` failed"),
                source: Some(Box::new(e)),
            })?;
        debug!(to, subject = %email.subject, "reminder email delivered");
        Ok(())
    }
}
