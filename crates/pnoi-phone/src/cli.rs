use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Control a Pnoi recorder over Bluetooth serial or Wi-Fi.
#[derive(Debug, Parser)]
#[command(name = "pnoi-phone", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the per-user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Transport used to reach the recorder.
    #[command(subcommand)]
    pub variant: Variant,
}

/// Transport variants.
#[derive(Debug, Subcommand)]
pub enum Variant {
    /// Talk to the recorder over a Bluetooth serial port.
    Bluetooth,
    /// Talk to the recorder's HTTP server.
    Wifi(WifiArgs),
}

/// Overrides for the Wi-Fi variant.
#[derive(Debug, Args)]
pub struct WifiArgs {
    /// Recorder base URL, e.g. http://192.168.4.1:5000/
    #[arg(long)]
    pub base_url: Option<String>,

    /// Platform identifier that picks the download location ("Android" or "iOS").
    #[arg(long)]
    pub platform: Option<String>,
}
