// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use finbell_core::FinbellError;
use tokio_rusqlite::Connection;

use crate::migrations;

/// Handle to the finbell SQLite database.
///
/// Cloning is cheap; all clones share the same background connection thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL mode enabled.
    pub async fn open(path: &str) -> Result<Self, FinbellError> {
        Self::open_with_options(path, true).await
    }

    /// Open (or create) the database at `path`.
    ///
    /// Creates parent directories as needed, applies PRAGMAs, and runs all
    /// pending migrations before the async connection takes over.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, FinbellError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(map_tr_err)?;
        }

        // Bootstrap on a blocking thread: PRAGMAs and migrations go through
        // the plain rusqlite API, then the connection is dropped and reopened
        // asynchronously.
        let bootstrap_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), FinbellError> {
            let mut conn = rusqlite::Connection::open(&bootstrap_path).map_err(map_tr_err)?;
            let journal = if wal_mode { "WAL" } else { "DELETE" };
            conn.execute_batch(&format!(
                "PRAGMA journal_mode = {journal};
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;"
            ))
            .map_err(map_tr_err)?;
            migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(map_tr_err)??;

        let conn = Connection::open(path.to_string()).await.map_err(map_tr_err)?;

        // Per-session PRAGMAs for the long-lived async connection.
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL so all committed data lands in the main file.
    pub async fn close(&self) -> Result<(), FinbellError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Map any storage-adjacent error into [`FinbellError::Storage`].
pub fn map_tr_err<E>(err: E) -> FinbellError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FinbellError::Storage {
        source: Box::new(err),
    }
}
