//! Pnoi Phone: terminal front end for a Pnoi recorder.

mod app;
mod cli;
mod config;
mod console;
mod error;
mod input;
#[cfg(test)]
mod tests;
mod user_action;

pub(crate) use {
    app::App,
    console::{ConsoleConfirm, ConsoleDisplay},
    error::{AppError, Result as AppResult},
    user_action::UserAction,
};

use crate::{cli::Cli, config::Config};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "pnoi_phone=info,pnoi_core=info";

/// Application entry point.
#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the status log.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let app = App {
        config,
        input: input::spawn_stdin_reader(),
    };

    if let Err(e) = app.run(cli.variant).await {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}
