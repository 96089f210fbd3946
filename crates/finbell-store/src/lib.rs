// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Finbell.
//!
//! One WAL-mode database holds the bills, the user directory, and the
//! append-only notification history. Migrations are embedded and run on
//! open; all access is funneled through a single async connection (see
//! [`writer`]). [`SqliteStore`] is the facade the rest of the service
//! talks to, via the `finbell-core` traits.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod writer;

pub use adapter::SqliteStore;
pub use database::Database;
