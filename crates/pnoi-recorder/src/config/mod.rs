#[allow(clippy::module_inception)]
mod config;
mod http_config;
mod logging_config;
mod recording_config;
mod serial_config;

pub(crate) use {
    config::Config, http_config::HttpConfig, logging_config::LoggingConfig,
    recording_config::RecordingConfig, serial_config::SerialConfig,
};

use std::path::PathBuf;

pub(crate) const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub(crate) const DEFAULT_SERIAL_DEVICE: &str = "/dev/rfcomm0";
pub(crate) const DEFAULT_BAUD_RATE: u32 = 9600;
pub(crate) const DEFAULT_RECORDING_PATH: &str = "recording.wav";
pub(crate) const DEFAULT_RECORD_COMMAND: &str = "arecord -f cd {file}";
pub(crate) const DEFAULT_TRANSFER_COMMAND: &str = "./scripts/transfer.sh {file}";

pub(crate) fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

pub(crate) fn default_serial_device() -> PathBuf {
    PathBuf::from(DEFAULT_SERIAL_DEVICE)
}

pub(crate) fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

pub(crate) fn default_recording_path() -> PathBuf {
    PathBuf::from(DEFAULT_RECORDING_PATH)
}

pub(crate) fn default_record_command() -> String {
    DEFAULT_RECORD_COMMAND.to_string()
}

pub(crate) fn default_transfer_command() -> String {
    DEFAULT_TRANSFER_COMMAND.to_string()
}

pub(crate) fn default_log_directory() -> PathBuf {
    PathBuf::from(".")
}
