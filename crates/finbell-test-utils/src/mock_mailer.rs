// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock mail sender for deterministic testing.
//!
//! `MockMailer` implements `MailSender` by capturing every email in
//! memory, enabling fast, CI-runnable tests without an SMTP server.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use finbell_core::{FinbellError, MailSender, RenderedEmail};

/// A captured outbound email.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// A mock mail sender that records deliveries instead of sending them.
///
/// Recipients registered through [`MockMailer::fail_for`] are rejected
/// with a mail error on every attempt, which lets tests exercise the
/// per-bill failure path.
pub struct MockMailer {
    sent: Mutex<Vec<SentEmail>>,
    failing: Mutex<HashSet<String>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make every send to `recipient` fail from now on.
    pub async fn fail_for(&self, recipient: &str) {
        self.failing.lock().await.insert(recipient.to_string());
    }

    /// Stop failing sends, for tests that recover a broken recipient.
    pub async fn clear_failures(&self) {
        self.failing.lock().await.clear();
    }

    /// Snapshot of everything captured so far, in send order.
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }

    /// Number of captured emails.
    pub async fn count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Drop all captured emails.
    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailSender for MockMailer {
    async fn send(&self, to: &str, email: &RenderedEmail) -> Result<(), FinbellError> {
        if self.failing.lock().await.contains(to) {
            return Err(FinbellError::Mail {
                message: format!("mock delivery to {to} rejected"),
                source: None,
            });
        }

        debug!(%to, subject = %email.subject, "mock mailer captured email");
        self.sent.lock().await.push(SentEmail {
            to: to.to_string(),
            subject: email.subject.clone(),
            html: email.html.clone(),
            text: email.text.clone(),
        });
        Ok(())
    }
}
