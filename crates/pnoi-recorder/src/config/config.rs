//! Recorder configuration: TOML file with per-section defaults.

use crate::{
    RecorderError, RecorderResult,
    config::{HttpConfig, LoggingConfig, RecordingConfig, SerialConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Serial listener settings.
    #[serde(default)]
    pub serial: SerialConfig,
    /// Record and transfer commands.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Log file settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from `path`, or from the per-user config file when
    /// `path` is `None`. A missing file is created with defaults.
    #[track_caller]
    #[instrument]
    pub fn load(path: Option<&Path>) -> RecorderResult<Self> {
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
        let config: Config = toml::from_str(&contents)
            .map_err(|e| config_error(format!("Failed to parse config: {}", e)))?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to `config_path` through a temporary file and a
    /// rename, so a crash mid-write never leaves a truncated config.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> RecorderResult<()> {
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
        let mut temp_file = fs::File::create(&temp_path)
            .map_err(|e| config_error(format!("Failed to create temp config file: {}", e)))?;
        temp_file
            .write_all(contents.as_bytes())
            .and_then(|()| temp_file.sync_all())
            .map_err(|e| config_error(format!("Failed to write temp config file: {}", e)))?;
        fs::rename(&temp_path, config_path)
            .map_err(|e| config_error(format!("Failed to rename temp config to final: {}", e)))?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> RecorderResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "pnoi", "Pnoi-Recorder")
            .ok_or_else(|| config_error("Failed to get config directory".to_string()))?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[track_caller]
fn config_error(reason: String) -> RecorderError {
    RecorderError::ConfigError {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
