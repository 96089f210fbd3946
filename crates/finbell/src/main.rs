// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finbell - recurring bill due-date email notifications.
//!
//! This is the binary entry point for the finbell daemon and CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

use finbell_config::FinbellConfig;
use finbell_core::{FinbellError, RunTrigger};

mod run;
mod serve;
mod shutdown;

/// Finbell - recurring bill due-date email notifications.
#[derive(Parser, Debug)]
#[command(name = "finbell", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the finbell daemon: scheduler plus optional HTTP gateway.
    Serve,
    /// Execute a single notification run and exit.
    Run {
        /// Record the run as schedule-driven instead of operator-initiated.
        /// Meant for external cron invoking `finbell run` directly.
        #[arg(long)]
        scheduled: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match finbell_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            finbell_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Run { scheduled }) => {
            let trigger = if scheduled {
                RunTrigger::Scheduled
            } else {
                RunTrigger::Manual
            };
            run::run_once(config, trigger).await
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("finbell: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Renders the merged configuration as TOML with secrets redacted.
fn print_config(config: &FinbellConfig) -> Result<(), FinbellError> {
    println!("{}", redacted_toml(config)?);
    Ok(())
}

fn redacted_toml(config: &FinbellConfig) -> Result<String, FinbellError> {
    let mut config = config.clone();
    if config.smtp.password.is_some() {
        config.smtp.password = Some("[redacted]".to_string());
    }
    if config.gateway.bearer_token.is_some() {
        config.gateway.bearer_token = Some("[redacted]".to_string());
    }

    toml::to_string_pretty(&config)
        .map_err(|e| FinbellError::Config(format!("could not render configuration: {e}")))
}
