//! Pnoi Core Library
//!
//! Drives a remote Pnoi recorder from a phone, either over a Bluetooth
//! serial link or over the recorder's Wi-Fi HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use pnoi_core::{
//!     Confirm, ReqwestTransport, StatusLog, WifiController, WifiSettings,
//!     DEFAULT_BASE_URL,
//! };
//!
//! struct AlwaysYes;
//!
//! #[async_trait::async_trait]
//! impl Confirm for AlwaysYes {
//!     async fn confirm(&mut self, _prompt: &str) -> bool {
//!         true
//!     }
//! }
//!
//! # async fn run() -> pnoi_core::CoreResult<()> {
//! let settings = WifiSettings {
//!     base_url: DEFAULT_BASE_URL.to_string(),
//!     platform: "Android".to_string(),
//!     documents_dir: std::path::PathBuf::from("."),
//! };
//! let mut controller =
//!     WifiController::new(ReqwestTransport::new()?, StatusLog::new(), AlwaysYes, settings);
//!
//! controller.probe().await;
//! controller.toggle_recording().await;
//! controller.transfer().await;
//!
//! for line in controller.status().lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

mod bluetooth;
mod command;
mod display;
mod error;
mod http;
mod recording_state;
mod serial;
mod wifi;

pub use {
    bluetooth::{BluetoothController, DATA_DELIMITER},
    command::DeviceCommand,
    display::{Confirm, StatusDisplay, StatusLog},
    error::{CoreError, Result as CoreResult},
    http::{HttpResponse, HttpTransport, ReqwestTransport},
    recording_state::{ConnectionState, RecordingState},
    serial::{SerialDevice, SerialPortTransport, SerialTransport},
    wifi::{
        ANDROID_DOWNLOAD_DIR, DEFAULT_BASE_URL, Platform, RECORDING_FILE_NAME, WifiController,
        WifiSettings, download_location, host_platform, location_to_path,
    },
};

#[cfg(test)]
mod tests;
