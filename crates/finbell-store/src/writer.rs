// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-writer contract.
//!
//! Exactly one `tokio_rusqlite::Connection` exists per database file, held
//! by [`Database`](crate::database::Database), and every query closure in
//! this crate runs on its background thread in submission order. Opening a
//! second connection for writes would reintroduce `SQLITE_BUSY` under
//! load. History dedup does not depend on this serialization: the unique
//! index on `(bill_id, kind, sent_on)` holds no matter how many writers
//! race.
