use crate::config::{default_record_command, default_recording_path, default_transfer_command};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recording process configuration.
///
/// Commands are split on whitespace; `{file}` is replaced by the recording
/// path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// File the record command writes and transfers serve.
    #[serde(default = "default_recording_path")]
    pub path: PathBuf,

    /// Long-running command that records audio until killed.
    #[serde(default = "default_record_command")]
    pub record_command: String,

    /// Command that pushes the recording to the phone over Bluetooth.
    #[serde(default = "default_transfer_command")]
    pub transfer_command: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            path: default_recording_path(),
            record_command: default_record_command(),
            transfer_command: default_transfer_command(),
        }
    }
}
