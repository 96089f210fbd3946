// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete notification stack on top of a
//! temp SQLite database and a [`MockMailer`]. Tests seed bills and
//! users, run the batch for a chosen date, and assert on the captured
//! mail and the recorded history.

use std::sync::Arc;

use chrono::NaiveDate;

use finbell_config::model::{NotifierConfig, ServiceConfig, StorageConfig};
use finbell_core::{
    Bill, BillId, BillSource, FinbellError, MailSender, NotificationHistory, NotificationRecord,
    OwnerId, RunSummary, RunTrigger, UserDirectory,
};
use finbell_notifier::{NotificationBatch, Renderer};
use finbell_store::SqliteStore;

use crate::mock_mailer::MockMailer;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    display_name: Option<String>,
    currency_symbol: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            display_name: None,
            currency_symbol: None,
        }
    }

    /// Override the app name rendered into emails.
    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    /// Override the currency symbol rendered into emails.
    pub fn with_currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = Some(symbol.to_string());
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, FinbellError> {
        // Temp directory for SQLite, cleaned up on drop
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| FinbellError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage_config = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let store = SqliteStore::new(storage_config);
        store.initialize().await?;
        let store = Arc::new(store);

        let mailer = Arc::new(MockMailer::new());

        let mut service = ServiceConfig::default();
        if let Some(name) = self.display_name {
            service.display_name = name;
        }
        let mut notifier = NotifierConfig::default();
        if let Some(symbol) = self.currency_symbol {
            notifier.currency_symbol = symbol;
        }
        let renderer = Renderer::new(&service, &notifier);

        let batch = NotificationBatch::new(
            store.clone() as Arc<dyn BillSource>,
            store.clone() as Arc<dyn UserDirectory>,
            store.clone() as Arc<dyn NotificationHistory>,
            mailer.clone() as Arc<dyn MailSender>,
            renderer,
        );

        Ok(TestHarness {
            store,
            mailer,
            batch,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a temp database and mock mailer.
pub struct TestHarness {
    /// SQLite store backing bills, users, and notification history.
    pub store: Arc<SqliteStore>,
    /// The mock mailer capturing outbound email.
    pub mailer: Arc<MockMailer>,
    /// The assembled batch under test.
    pub batch: NotificationBatch,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Insert an unpaid bill.
    pub async fn seed_bill(
        &self,
        id: &str,
        owner: &str,
        name: &str,
        amount_cents: i64,
        due_on: NaiveDate,
    ) -> Result<(), FinbellError> {
        let bill = Bill {
            id: BillId(id.to_string()),
            owner_id: OwnerId(owner.to_string()),
            name: name.to_string(),
            amount_cents,
            due_on,
            paid: false,
        };
        self.store.insert_bill(&bill).await
    }

    /// Insert or update a user. `email: None` models a user without an
    /// address on file.
    pub async fn seed_user(&self, id: &str, email: Option<&str>) -> Result<(), FinbellError> {
        self.store.upsert_user(&OwnerId(id.to_string()), email, None).await
    }

    /// Mark a seeded bill as paid.
    pub async fn mark_paid(&self, id: &str) -> Result<(), FinbellError> {
        self.store.set_paid(&BillId(id.to_string()), true).await
    }

    /// Run the batch as the scheduler would, for the given date.
    pub async fn run_on(&self, today: NaiveDate) -> Result<RunSummary, FinbellError> {
        self.batch.execute(today, RunTrigger::Scheduled).await
    }

    /// Run the batch as the gateway would, for the given date.
    pub async fn run_manual_on(&self, today: NaiveDate) -> Result<RunSummary, FinbellError> {
        self.batch.execute(today, RunTrigger::Manual).await
    }

    /// Everything recorded for one bill, oldest first.
    pub async fn history(&self, bill_id: &str) -> Result<Vec<NotificationRecord>, FinbellError> {
        self.store.history_for_bill(&BillId(bill_id.to_string())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn builder_creates_working_environment() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness.store.health_check().await.unwrap();

        harness
            .seed_bill("b-1", "u-1", "Rent", 120_000, date(2026, 3, 10))
            .await
            .unwrap();
        let bill = harness
            .store
            .get_bill(&BillId("b-1".to_string()))
            .await
            .unwrap();
        assert!(bill.is_some());
    }

    #[tokio::test]
    async fn run_delivers_through_the_mock_mailer() {
        let harness = TestHarness::builder().build().await.unwrap();
        let today = date(2026, 3, 10);

        harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
        harness
            .seed_bill("b-1", "u-1", "Internet", 8_990, today)
            .await
            .unwrap();

        let summary = harness.run_on(today).await.unwrap();
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.examined, 1);

        let sent = harness.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ana@example.com");
    }

    #[tokio::test]
    async fn harnesses_have_independent_databases() {
        let h1 = TestHarness::builder().build().await.unwrap();
        let h2 = TestHarness::builder().build().await.unwrap();

        h1.seed_bill("only-in-h1", "u-1", "Water", 4_500, date(2026, 3, 10))
            .await
            .unwrap();

        let in_h2 = h2
            .store
            .get_bill(&BillId("only-in-h1".to_string()))
            .await
            .unwrap();
        assert!(in_h2.is_none());
    }

    #[tokio::test]
    async fn custom_branding_reaches_the_rendered_mail() {
        let harness = TestHarness::builder()
            .with_display_name("Meu Money")
            .with_currency_symbol("R$")
            .build()
            .await
            .unwrap();
        let today = date(2026, 3, 10);

        harness.seed_user("u-1", Some("ana@example.com")).await.unwrap();
        harness
            .seed_bill("b-1", "u-1", "Luz", 15_750, today)
            .await
            .unwrap();

        harness.run_on(today).await.unwrap();

        let sent = harness.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html.contains("Meu Money"));
        assert!(sent[0].html.contains("R$157.50"));
    }
}
