// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the core storage traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::OnceCell;
use tracing::debug;

use finbell_config::model::StorageConfig;
use finbell_core::types::{
    Bill, BillId, NewNotification, NotificationRecord, OwnerId, RecordOutcome,
};
use finbell_core::{BillSource, FinbellError, NotificationHistory, UserDirectory};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`]. One instance serves as the bill
/// source, the user directory, and the notification history.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, FinbellError> {
        self.db.get().ok_or_else(|| FinbellError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), FinbellError> {
        let db =
            Database::open_with_options(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| FinbellError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Verify the database answers queries.
    pub async fn health_check(&self) -> Result<(), FinbellError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(())
    }

    /// Checkpoint the WAL before shutdown.
    pub async fn close(&self) -> Result<(), FinbellError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }

    // --- Bill operations (application side of the shared database) ---

    pub async fn insert_bill(&self, bill: &Bill) -> Result<(), FinbellError> {
        queries::bills::insert_bill(self.db()?, bill).await
    }

    pub async fn get_bill(&self, id: &BillId) -> Result<Option<Bill>, FinbellError> {
        queries::bills::get_bill(self.db()?, id).await
    }

    pub async fn set_paid(&self, id: &BillId, paid: bool) -> Result<(), FinbellError> {
        queries::bills::set_paid(self.db()?, id, paid).await
    }

    // --- Directory operations ---

    pub async fn upsert_user(
        &self,
        id: &OwnerId,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<(), FinbellError> {
        queries::users::upsert_user(self.db()?, id, email, display_name).await
    }

    // --- History inspection ---

    pub async fn history_for_bill(
        &self,
        bill_id: &BillId,
    ) -> Result<Vec<NotificationRecord>, FinbellError> {
        queries::notifications::history_for_bill(self.db()?, bill_id).await
    }
}

#[async_trait]
impl BillSource for SqliteStore {
    async fn unpaid_bills(&self) -> Result<Vec<Bill>, FinbellError> {
        queries::bills::unpaid_bills(self.db()?).await
    }
}

#[async_trait]
impl UserDirectory for SqliteStore {
    async fn email_for(&self, owner_id: &OwnerId) -> Result<Option<String>, FinbellError> {
        queries::users::email_for(self.db()?, owner_id).await
    }
}

#[async_trait]
impl NotificationHistory for SqliteStore {
    async fn exists(
        &self,
        bill_id: &BillId,
        kind: finbell_core::types::NotificationKind,
        sent_on: NaiveDate,
    ) -> Result<bool, FinbellError> {
        queries::notifications::exists(self.db()?, bill_id, kind, sent_on).await
    }

    async fn record(&self, notification: &NewNotification) -> Result<RecordOutcome, FinbellError> {
        queries::notifications::record(self.db()?, notification).await
    }
}
