mod bluetooth_config;
#[allow(clippy::module_inception)]
mod config;
mod wifi_config;

pub(crate) use {bluetooth_config::BluetoothConfig, config::Config, wifi_config::WifiConfig};

use std::path::PathBuf;

use pnoi_core::DEFAULT_BASE_URL;

pub(crate) const DEFAULT_ADAPTER_PATH: &str = "/sys/class/bluetooth";
pub(crate) const DEFAULT_BAUD_RATE: u32 = 9600;

pub(crate) fn default_adapter_path() -> PathBuf {
    PathBuf::from(DEFAULT_ADAPTER_PATH)
}

pub(crate) fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
