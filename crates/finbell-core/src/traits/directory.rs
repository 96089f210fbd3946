// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner-to-email resolution.

use async_trait::async_trait;

use crate::error::FinbellError;
use crate::types::OwnerId;

/// Resolves a bill owner to a deliverable email address.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Returns the owner's email address, or `None` when the owner is
    /// unknown or has no address on file. The batch treats both the same
    /// way: warn and skip the bill.
    async fn email_for(&self, owner_id: &OwnerId) -> Result<Option<String>, FinbellError>;
}
