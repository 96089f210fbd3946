// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bill store read access.

use async_trait::async_trait;

use crate::error::FinbellError;
use crate::types::Bill;

/// Bulk-read access to the bill store.
///
/// The batch fetches every unpaid bill once per run. A failure here is the
/// only error that aborts a batch run.
#[async_trait]
pub trait BillSource: Send + Sync + 'static {
    /// Returns all bills currently marked unpaid, in no particular order.
    async fn unpaid_bills(&self) -> Result<Vec<Bill>, FinbellError>;
}
