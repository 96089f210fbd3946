// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The daily notification batch.
//!
//! [`NotificationBatch`] walks every unpaid bill once per run: classify,
//! dedup against the history, resolve the owner's address, render, send,
//! record. Bills are processed in isolation; a failure on one bill is
//! logged and skipped, never aborting the run. The only fatal error is
//! failing to fetch the working set itself.

use std::sync::Arc;

use chrono::NaiveDate;
use finbell_core::types::{Bill, NewNotification, RecordOutcome, RunSummary, RunTrigger};
use finbell_core::{BillSource, FinbellError, MailSender, NotificationHistory, UserDirectory};
use tracing::{debug, error, info, warn};

use crate::classification::classify;
use crate::template::Renderer;

/// Runs the notification batch over the current working set of bills.
///
/// Collaborators are trait objects so the batch can be exercised against
/// in-memory fakes; production wires in the SQLite store and the SMTP
/// mailer.
pub struct NotificationBatch {
    bills: Arc<dyn BillSource>,
    directory: Arc<dyn UserDirectory>,
    history: Arc<dyn NotificationHistory>,
    mailer: Arc<dyn MailSender>,
    renderer: Renderer,
}

impl NotificationBatch {
    pub fn new(
        bills: Arc<dyn BillSource>,
        directory: Arc<dyn UserDirectory>,
        history: Arc<dyn NotificationHistory>,
        mailer: Arc<dyn MailSender>,
        renderer: Renderer,
    ) -> Self {
        Self {
            bills,
            directory,
            history,
            mailer,
            renderer,
        }
    }

    /// Execute one batch run for the given calendar date.
    ///
    /// Re-running with the same date is safe: the history dedup turns every
    /// repeat into a skip, except overdue bills which qualify again on each
    /// new date until paid.
    pub async fn execute(
        &self,
        today: NaiveDate,
        trigger: RunTrigger,
    ) -> Result<RunSummary, FinbellError> {
        info!(%today, trigger = %trigger, "starting notification batch");

        // 1. Fetch the working set. This is the only fatal failure point.
        let bills = self.bills.unpaid_bills().await?;
        let examined = bills.len();
        debug!(examined, "fetched unpaid bills");

        // 2. Walk each bill in isolation.
        let mut sent = 0usize;
        for bill in &bills {
            match self.process_bill(bill, today).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(e) => {
                    error!(bill_id = %bill.id.0, error = %e, "bill processing failed, skipping");
                }
            }
        }

        // 3. Summarize the run.
        let summary = RunSummary {
            examined,
            sent,
            trigger,
        };
        info!(
            examined = summary.examined,
            sent = summary.sent,
            trigger = %summary.trigger,
            "notification batch complete"
        );
        Ok(summary)
    }

    /// Process a single bill. Returns `Ok(true)` when a reminder was sent
    /// (or confirmed recorded), `Ok(false)` when the bill was skipped.
    async fn process_bill(&self, bill: &Bill, today: NaiveDate) -> Result<bool, FinbellError> {
        // Outside the reminder window entirely.
        let Some(classification) = classify(bill.due_on, today) else {
            return Ok(false);
        };

        // Day-level dedup fast path. The conditional write below stays
        // authoritative under races.
        if self
            .history
            .exists(&bill.id, classification.kind, today)
            .await?
        {
            debug!(
                bill_id = %bill.id.0,
                kind = %classification.kind,
                "reminder already sent today, skipping"
            );
            return Ok(false);
        }

        // No address on file: the bill is examined but cannot be notified.
        let Some(recipient) = self.directory.email_for(&bill.owner_id).await? else {
            warn!(
                bill_id = %bill.id.0,
                owner_id = %bill.owner_id.0,
                "owner has no email address, skipping"
            );
            return Ok(false);
        };

        let email = self.renderer.render(bill, &classification);
        self.mailer.send(&recipient, &email).await?;

        // A conflict means another writer landed the row between the exists
        // check and this insert. The reminder exists either way.
        let outcome = self
            .history
            .record(&NewNotification {
                bill_id: bill.id.clone(),
                owner_id: bill.owner_id.clone(),
                kind: classification.kind,
                recipient: recipient.clone(),
                sent_on: today,
            })
            .await?;
        if outcome == RecordOutcome::AlreadySent {
            debug!(bill_id = %bill.id.0, "history record raced with another writer");
        }

        info!(
            bill_id = %bill.id.0,
            kind = %classification.kind,
            recipient = %recipient,
            "reminder sent"
        );
        Ok(true)
    }
}
