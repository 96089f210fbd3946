// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only notification history.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::FinbellError;
use crate::types::{BillId, NewNotification, NotificationKind, RecordOutcome};

/// Append-only store of sent notifications, keyed by
/// (bill, kind, calendar send date).
///
/// The history is the sole idempotency mechanism: the batch holds no state
/// between runs. Rows are never updated or deleted by this service.
#[async_trait]
pub trait NotificationHistory: Send + Sync + 'static {
    /// Fast-path dedup check: has this (bill, kind, date) already been sent?
    ///
    /// Purely an optimization to skip rendering and SMTP work on re-runs;
    /// correctness rests on the conditional write in [`record`](Self::record).
    async fn exists(
        &self,
        bill_id: &BillId,
        kind: NotificationKind,
        sent_on: NaiveDate,
    ) -> Result<bool, FinbellError>;

    /// Conditionally append a history row.
    ///
    /// Returns [`RecordOutcome::Recorded`] if a row was inserted, or
    /// [`RecordOutcome::AlreadySent`] if the unique (bill, kind, date)
    /// constraint already held one. Concurrent callers racing on the same
    /// key must observe exactly one `Recorded` between them.
    async fn record(&self, notification: &NewNotification) -> Result<RecordOutcome, FinbellError>;
}
