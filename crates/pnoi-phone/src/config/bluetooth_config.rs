use crate::config::{default_adapter_path, default_baud_rate};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Bluetooth serial configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BluetoothConfig {
    /// Directory listing Bluetooth adapters; empty or missing means disabled.
    #[serde(default = "default_adapter_path")]
    pub adapter_path: PathBuf,

    /// Baud rate used when opening the RFCOMM serial port.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

impl Default for BluetoothConfig {
    fn default() -> Self {
        Self {
            adapter_path: default_adapter_path(),
            baud_rate: default_baud_rate(),
        }
    }
}
