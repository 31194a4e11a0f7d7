//! Configuration management for pnoi-phone.
//!
//! The file lives in the per-user config directory unless `--config` names
//! one. Every key has a default, so partial files are fine.

use crate::{
    AppError, AppResult,
    config::{BluetoothConfig, WifiConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use pnoi_core::{WifiSettings, host_platform};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bluetooth serial settings.
    #[serde(default)]
    pub bluetooth: BluetoothConfig,
    /// Wi-Fi HTTP settings.
    #[serde(default)]
    pub wifi: WifiConfig,
}

impl Config {
    /// Load configuration from `path`, or from the per-user config file when
    /// `path` is `None`. A missing file is created with defaults.
    #[track_caller]
    #[instrument]
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            info!(config_path = ?config_path, "No config found, creating default");
            let config = Config::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .map_err(|e| config_error(format!("Failed to read config: {}", e)))?;
        let config = toml::from_str(&contents)
            .map_err(|e| config_error(format!("Failed to parse config: {}", e)))?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to `config_path` via a synced temporary file and a
    /// rename, so readers never observe a partial file.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
            debug!(config_dir = ?parent, "Created config directory");
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| config_error(format!("Failed to serialize config: {}", e)))?;

        let temp_path = config_path.with_extension("toml.tmp");
        fs::File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(contents.as_bytes())?;
                file.sync_all()
            })
            .map_err(|e| config_error(format!("Failed to write {}: {}", temp_path.display(), e)))?;
        fs::rename(&temp_path, config_path)
            .map_err(|e| config_error(format!("Failed to replace config: {}", e)))?;

        info!(config_path = ?config_path, "Configuration saved");

        Ok(())
    }

    /// Wi-Fi controller settings, with command-line overrides applied.
    pub fn wifi_settings(&self, base_url: Option<&str>, platform: Option<&str>) -> WifiSettings {
        let base_url = base_url.unwrap_or(&self.wifi.base_url);

        WifiSettings {
            base_url: with_trailing_slash(base_url),
            platform: platform
                .map(str::to_string)
                .or_else(|| self.wifi.platform.clone())
                .unwrap_or_else(host_platform),
            documents_dir: self
                .wifi
                .documents_dir
                .clone()
                .or_else(user_documents_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "pnoi", "Pnoi-Phone")
            .ok_or_else(|| config_error("Failed to get config directory".to_string()))?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[track_caller]
fn config_error(reason: String) -> AppError {
    AppError::ConfigError {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

fn user_documents_dir() -> Option<PathBuf> {
    UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
}

/// Command names are appended directly, so the base must end in `/`.
pub(crate) fn with_trailing_slash(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    }
}
