// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound mail delivery.

use async_trait::async_trait;

use crate::error::FinbellError;
use crate::types::RenderedEmail;

/// Delivers a rendered notification email to a single recipient.
#[async_trait]
pub trait MailSender: Send + Sync + 'static {
    async fn send(&self, to: &str, email: &RenderedEmail) -> Result<(), FinbellError>;
}
