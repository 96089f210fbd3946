// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the finbell workspace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a bill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillId(pub String);

/// Unique identifier for a bill's owner in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

/// A recurring bill as read from the bill store.
///
/// Bills are owned by the surrounding finance application; finbell only
/// reads them. `amount_cents` is the amount in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub owner_id: OwnerId,
    pub name: String,
    pub amount_cents: i64,
    pub due_on: NaiveDate,
    pub paid: bool,
}

/// The kind of reminder a bill qualifies for on a given day.
///
/// The string form (`two_days_before`, `one_day_before`, `due_today`,
/// `overdue`) is what gets persisted in the notification history and is
/// part of the day-level dedup key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TwoDaysBefore,
    OneDayBefore,
    DueToday,
    Overdue,
}

/// A notification to be appended to the history.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub bill_id: BillId,
    pub owner_id: OwnerId,
    pub kind: NotificationKind,
    /// Email address the reminder was actually delivered to.
    pub recipient: String,
    /// Calendar date of the send; part of the dedup key.
    pub sent_on: NaiveDate,
}

/// A notification history row as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: i64,
    pub bill_id: BillId,
    pub owner_id: OwnerId,
    pub kind: NotificationKind,
    pub recipient: String,
    pub sent_on: NaiveDate,
    pub created_at: String,
}

/// Outcome of a conditional history append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new history row was inserted.
    Recorded,
    /// The unique (bill, kind, send date) constraint already held a row;
    /// nothing was written.
    AlreadySent,
}

/// What initiated a batch run. Labeling only; the algorithm is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RunTrigger {
    Scheduled,
    Manual,
}

/// Summary of a completed batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of unpaid bills fetched and walked.
    pub examined: usize,
    /// Number of reminders sent and recorded this run.
    pub sent: usize,
    pub trigger: RunTrigger,
}

impl RunSummary {
    /// Human-readable one-line outcome, e.g.
    /// `"3 notifications sent, 12 bills examined"`.
    pub fn message(&self) -> String {
        format!(
            "{} notification{} sent, {} bill{} examined",
            self.sent,
            if self.sent == 1 { "" } else { "s" },
            self.examined,
            if self.examined == 1 { "" } else { "s" },
        )
    }
}

/// A fully rendered reminder email, ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    /// Plain-text alternative part.
    pub text: String,
}
