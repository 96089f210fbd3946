// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification history operations.
//!
//! The history table carries a unique index over (bill_id, kind, sent_on).
//! [`record`] writes through it with `INSERT OR IGNORE`, so a conflicting
//! append is reported as [`RecordOutcome::AlreadySent`] instead of an error.

use chrono::NaiveDate;
use finbell_core::types::{
    BillId, NewNotification, NotificationKind, NotificationRecord, OwnerId, RecordOutcome,
};
use finbell_core::FinbellError;
use rusqlite::params;

use crate::database::Database;

/// Check whether a reminder of this kind was already sent for the bill today.
///
/// Fast path used before rendering and delivery; the conditional write in
/// [`record`] remains the authority under races.
pub async fn exists(
    db: &Database,
    bill_id: &BillId,
    kind: NotificationKind,
    sent_on: NaiveDate,
) -> Result<bool, FinbellError> {
    let bill_id = bill_id.0.clone();
    let kind = kind.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT 1 FROM notifications
                 WHERE bill_id = ?1 AND kind = ?2 AND sent_on = ?3",
                params![bill_id, kind, sent_on],
                |_row| Ok(()),
            );
            match result {
                Ok(()) => Ok(true),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Conditionally append a notification to the history.
///
/// Returns [`RecordOutcome::Recorded`] when a row was inserted, or
/// [`RecordOutcome::AlreadySent`] when the dedup key already held one.
/// A conflict is a success from the caller's point of view; the reminder
/// for that day exists either way.
pub async fn record(
    db: &Database,
    notification: &NewNotification,
) -> Result<RecordOutcome, FinbellError> {
    let n = notification.clone();
    db.connection()
        .call(move |conn| -> Result<RecordOutcome, rusqlite::Error> {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO notifications (bill_id, owner_id, kind, recipient, sent_on)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    n.bill_id.0,
                    n.owner_id.0,
                    n.kind.to_string(),
                    n.recipient,
                    n.sent_on,
                ],
            )?;
            if inserted == 0 {
                Ok(RecordOutcome::AlreadySent)
            } else {
                Ok(RecordOutcome::Recorded)
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Full send history for a bill, oldest first.
pub async fn history_for_bill(
    db: &Database,
    bill_id: &BillId,
) -> Result<Vec<NotificationRecord>, FinbellError> {
    let bill_id = bill_id.0.clone();
    db.connection()
        .call(move |conn| -> Result<Vec<NotificationRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, bill_id, owner_id, kind, recipient, sent_on, created_at
                 FROM notifications WHERE bill_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![bill_id], |row| {
                let kind: String = row.get(3)?;
                let kind = kind.parse::<NotificationKind>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(NotificationRecord {
                    id: row.get(0)?,
                    bill_id: BillId(row.get(1)?),
                    owner_id: OwnerId(row.get(2)?),
                    kind,
                    recipient: row.get(4)?,
                    sent_on: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
