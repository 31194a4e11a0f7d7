use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Record audio on command from a Pnoi phone.
#[derive(Debug, Parser)]
#[command(name = "pnoi-recorder", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the per-user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// How the phone reaches the recorder.
    #[command(subcommand)]
    pub mode: Mode,
}

/// Listening modes.
#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Answer HTTP commands (Wi-Fi variant).
    Http {
        /// Override the configured bind address.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Listen for commands on a serial device (Bluetooth variant).
    Serial {
        /// Override the configured device.
        #[arg(long)]
        device: Option<PathBuf>,
    },
}
