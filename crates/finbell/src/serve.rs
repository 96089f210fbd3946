// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `finbell serve` command implementation.
//!
//! Starts the daemon: SQLite store, SMTP transport, the notification
//! batch driven by a cron schedule, and the optional HTTP gateway for
//! health probes and manual runs. Supports graceful shutdown via
//! signal handlers.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use finbell_config::FinbellConfig;
use finbell_core::{
    BillSource, FinbellError, MailSender, NotificationHistory, RunTrigger, UserDirectory,
};
use finbell_gateway::{AuthConfig, GatewayState, HealthState, ServerConfig};
use finbell_mailer::SmtpMailer;
use finbell_notifier::{NotificationBatch, Renderer};
use finbell_store::SqliteStore;

use crate::shutdown;

/// Runs the `finbell serve` command.
///
/// Initializes storage and the SMTP transport, wires the batch, then
/// loops on the configured cron schedule until a shutdown signal
/// arrives. A failed scheduled run is logged and the daemon keeps
/// going; the next occurrence gets a fresh attempt.
pub async fn run_serve(config: FinbellConfig) -> Result<(), FinbellError> {
    init_tracing(&config.service.log_level);

    info!("starting finbell serve");

    // Parse the schedule up front so a bad expression fails the start,
    // not the first occurrence.
    let cron = config
        .notifier
        .schedule
        .parse::<croner::Cron>()
        .map_err(|e| {
            FinbellError::Schedule(format!(
                "invalid schedule '{}': {e}",
                config.notifier.schedule
            ))
        })?;

    // Initialize storage.
    let store = {
        let store = SqliteStore::new(config.storage.clone());
        store.initialize().await?;
        Arc::new(store)
    };

    // Initialize the SMTP transport.
    let mailer = {
        let mailer = SmtpMailer::new(&config.smtp).map_err(|e| {
            error!(error = %e, "failed to initialize SMTP transport");
            eprintln!(
                "error: SMTP transport could not be built. Check smtp.host and smtp.from in finbell.toml."
            );
            e
        })?;
        Arc::new(mailer)
    };

    let renderer = Renderer::new(&config.service, &config.notifier);
    let batch = Arc::new(NotificationBatch::new(
        store.clone() as Arc<dyn BillSource>,
        store.clone() as Arc<dyn UserDirectory>,
        store.clone() as Arc<dyn NotificationHistory>,
        mailer as Arc<dyn MailSender>,
        renderer,
    ));

    // Install signal handler.
    let cancel = shutdown::install_signal_handler();

    // Start the gateway (if enabled).
    if config.gateway.enabled {
        // Refuse to expose the run endpoint without authentication.
        if config.gateway.bearer_token.is_none() {
            return Err(FinbellError::Config(
                "gateway enabled but no bearer token configured; set gateway.bearer_token"
                    .to_string(),
            ));
        }

        let server_config = ServerConfig {
            host: config.gateway.host.clone(),
            port: config.gateway.port,
        };
        let state = GatewayState {
            batch: batch.clone(),
            auth: AuthConfig::new(config.gateway.bearer_token.clone()),
            health: HealthState::new(),
        };
        let gw_cancel = cancel.clone();

        info!(
            host = config.gateway.host.as_str(),
            port = config.gateway.port,
            "starting gateway"
        );
        tokio::spawn(async move {
            tokio::select! {
                result = finbell_gateway::start_server(&server_config, state) => {
                    if let Err(e) = result {
                        error!(error = %e, "gateway server terminated");
                    }
                }
                _ = gw_cancel.cancelled() => {
                    info!("gateway shutting down");
                }
            }
        });
    } else {
        debug!("gateway disabled by configuration");
    }

    info!(
        schedule = config.notifier.schedule.as_str(),
        "scheduler started"
    );

    loop {
        let now = chrono::Local::now();
        let next = cron.find_next_occurrence(&now, false).map_err(|e| {
            FinbellError::Schedule(format!(
                "no upcoming occurrence for '{}': {e}",
                config.notifier.schedule
            ))
        })?;
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);

        info!(next = %next, "next notification run scheduled");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                // The run is awaited inside this arm, so an in-flight
                // run finishes before shutdown is observed.
                let today = chrono::Local::now().date_naive();
                match batch.execute(today, RunTrigger::Scheduled).await {
                    Ok(summary) => {
                        info!(
                            sent = summary.sent,
                            examined = summary.examined,
                            "{}", summary.message()
                        );
                    }
                    Err(e) => {
                        error!(error = %e, "scheduled run failed");
                    }
                }
            }
            _ = cancel.cancelled() => {
                info!("scheduler shutting down");
                break;
            }
        }
    }

    store.close().await?;
    info!("finbell serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// The configured level applies to every finbell crate; dependencies
/// stay at warn. `RUST_LOG` overrides everything when set.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "finbell={level},finbell_core={level},finbell_config={level},\
             finbell_store={level},finbell_mailer={level},finbell_notifier={level},\
             finbell_gateway={level},warn",
            level = log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
