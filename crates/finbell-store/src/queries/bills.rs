// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bill read and seed operations.
//!
//! Bills belong to the surrounding finance application. The notifier only
//! ever reads them; the write operations here exist for seeding and for
//! the application side of the shared database.

use finbell_core::types::{Bill, BillId, OwnerId};
use finbell_core::FinbellError;
use rusqlite::params;

use crate::database::Database;

/// Insert a new bill.
pub async fn insert_bill(db: &Database, bill: &Bill) -> Result<(), FinbellError> {
    let bill = bill.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO bills (id, owner_id, name, amount_cents, due_on, paid)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    bill.id.0,
                    bill.owner_id.0,
                    bill.name,
                    bill.amount_cents,
                    bill.due_on,
                    bill.paid,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a bill by ID.
pub async fn get_bill(db: &Database, id: &BillId) -> Result<Option<Bill>, FinbellError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, name, amount_cents, due_on, paid
                 FROM bills WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(Bill {
                    id: BillId(row.get(0)?),
                    owner_id: OwnerId(row.get(1)?),
                    name: row.get(2)?,
                    amount_cents: row.get(3)?,
                    due_on: row.get(4)?,
                    paid: row.get(5)?,
                })
            });
            match result {
                Ok(bill) => Ok(Some(bill)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all unpaid bills, soonest due first.
///
/// This is the working set of every batch run; paid bills never reach
/// the classifier.
pub async fn unpaid_bills(db: &Database) -> Result<Vec<Bill>, FinbellError> {
    db.connection()
        .call(|conn| -> Result<Vec<Bill>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, name, amount_cents, due_on, paid
                 FROM bills WHERE paid = 0 ORDER BY due_on ASC, id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Bill {
                    id: BillId(row.get(0)?),
                    owner_id: OwnerId(row.get(1)?),
                    name: row.get(2)?,
                    amount_cents: row.get(3)?,
                    due_on: row.get(4)?,
                    paid: row.get(5)?,
                })
            })?;
            let mut bills = Vec::new();
            for row in rows {
                bills.push(row?);
            }
            Ok(bills)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set a bill's paid flag and bump updated_at.
pub async fn set_paid(db: &Database, id: &BillId, paid: bool) -> Result<(), FinbellError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "UPDATE bills SET paid = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![paid, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
