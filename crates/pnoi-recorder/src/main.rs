//! Pnoi Recorder: device-side server that records audio on command.

mod cli;
mod config;
mod error;
mod http;
mod logging;
mod recorder;
mod serial;
#[cfg(test)]
mod tests;

pub(crate) use {
    error::{RecorderError, Result as RecorderResult},
    recorder::Recorder,
};

use crate::{
    cli::{Cli, Mode},
    config::Config,
    serial::SerialSettings,
};

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Application entry point.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // The config names the log directory, so load errors above go to stderr.
    let log_guard = logging::init(&config.logging.directory);
    info!(cwd = ?std::env::current_dir().ok(), "Pnoi recorder starting");

    let result = run(cli.mode, config).await;
    match &result {
        Ok(()) => info!("All done."),
        Err(e) => error!(error = %e, "Recorder error"),
    }

    // Exiting skips destructors; flush the log file first.
    drop(log_guard);
    if result.is_err() {
        std::process::exit(1);
    }
}

async fn run(mode: Mode, config: Config) -> RecorderResult<()> {
    let mut recorder = Recorder::new(
        config.recording.record_command.clone(),
        config.recording.path.clone(),
    );

    match mode {
        Mode::Http { bind } => {
            let bind = bind.unwrap_or(config.http.bind);
            http::serve(&bind, Arc::new(Mutex::new(recorder))).await
        }
        Mode::Serial { device } => {
            let settings = SerialSettings {
                device: device
                    .unwrap_or(config.serial.device)
                    .to_string_lossy()
                    .into_owned(),
                baud_rate: config.serial.baud_rate,
                transfer_command: config.recording.transfer_command,
            };
            serial::serve(&settings, &mut recorder).await
        }
    }
}
