use crate::config::{default_baud_rate, default_serial_device};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Serial command listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial device the phone connects through, usually an RFCOMM node.
    #[serde(default = "default_serial_device")]
    pub device: PathBuf,

    /// Port speed.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: default_serial_device(),
            baud_rate: default_baud_rate(),
        }
    }
}
