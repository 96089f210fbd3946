// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `finbell run` command implementation.
//!
//! Executes exactly one notification run for today's local date and
//! prints the summary. Useful for operators and for deployments that
//! prefer external cron over the built-in scheduler.

use std::sync::Arc;

use tracing::info;

use finbell_config::FinbellConfig;
use finbell_core::{
    BillSource, FinbellError, MailSender, NotificationHistory, RunTrigger, UserDirectory,
};
use finbell_mailer::SmtpMailer;
use finbell_notifier::{NotificationBatch, Renderer};
use finbell_store::SqliteStore;

/// Runs the `finbell run` command.
pub async fn run_once(config: FinbellConfig, trigger: RunTrigger) -> Result<(), FinbellError> {
    crate::serve::init_tracing(&config.service.log_level);

    let store = {
        let store = SqliteStore::new(config.storage.clone());
        store.initialize().await?;
        Arc::new(store)
    };

    let mailer = {
        let mailer = SmtpMailer::new(&config.smtp).map_err(|e| {
            eprintln!(
                "error: SMTP transport could not be built. Check smtp.host and smtp.from in finbell.toml."
            );
            e
        })?;
        Arc::new(mailer)
    };

    let renderer = Renderer::new(&config.service, &config.notifier);
    let batch = NotificationBatch::new(
        store.clone() as Arc<dyn BillSource>,
        store.clone() as Arc<dyn UserDirectory>,
        store.clone() as Arc<dyn NotificationHistory>,
        mailer as Arc<dyn MailSender>,
        renderer,
    );

    let today = chrono::Local::now().date_naive();
    let summary = batch.execute(today, trigger).await?;

    info!(
        sent = summary.sent,
        examined = summary.examined,
        ?trigger,
        "run complete"
    );
    println!("{}", summary.message());

    store.close().await?;
    Ok(())
}
