use crate::config::{Config, DEFAULT_BAUD_RATE};

use std::path::{Path, PathBuf};

use pnoi_core::DEFAULT_BASE_URL;

/// WHAT: Missing config file is created with defaults
/// WHY: First launch must work without setup
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_loading_then_defaults_written() {
    // Given: A path in an empty directory
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    // When: Loading
    let config = Config::load(Some(&path)).unwrap();

    // Then: Defaults are used and persisted
    assert_eq!(config.wifi.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.bluetooth.baud_rate, DEFAULT_BAUD_RATE);
    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());
}

/// WHAT: Partial files fall back to per-key defaults
/// WHY: Users edit only the keys they care about
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_file_when_loading_then_missing_keys_defaulted() {
    // Given: A file that only sets the platform
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[wifi]\nplatform = \"iOS\"\n").unwrap();

    // When: Loading
    let config = Config::load(Some(&path)).unwrap();

    // Then: Platform set, everything else default
    assert_eq!(config.wifi.platform.as_deref(), Some("iOS"));
    assert_eq!(config.wifi.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        config.bluetooth.adapter_path,
        PathBuf::from("/sys/class/bluetooth")
    );
}

/// WHAT: Malformed TOML is a config error
/// WHY: A broken file must not silently reset settings
#[test]
#[allow(clippy::unwrap_used)]
fn given_malformed_file_when_loading_then_config_error() {
    // Given: A file that is not TOML
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[wifi\nbase_url = ").unwrap();

    // When: Loading
    let result = Config::load(Some(&path));

    // Then: A configuration error
    assert!(matches!(result, Err(crate::AppError::ConfigError { .. })));
}

/// WHAT: Saved settings load back unchanged
/// WHY: Atomic save must produce a readable file
#[test]
#[allow(clippy::unwrap_used)]
fn given_custom_config_when_saved_and_loaded_then_values_kept() {
    // Given: A customised config
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::default();
    config.wifi.base_url = "http://10.0.0.5:5000/".to_string();
    config.bluetooth.baud_rate = 115_200;

    // When: Saving and loading
    config.save_to(&path).unwrap();
    let loaded = Config::load(Some(&path)).unwrap();

    // Then: Values survive
    assert_eq!(loaded.wifi.base_url, "http://10.0.0.5:5000/");
    assert_eq!(loaded.bluetooth.baud_rate, 115_200);
}

/// WHAT: Command-line values override the file and URLs gain a slash
/// WHY: Command names are appended directly to the base URL
#[test]
fn given_overrides_when_building_wifi_settings_then_overrides_win() {
    // Given: A config with a platform and documents directory
    let mut config = Config::default();
    config.wifi.platform = Some("Android".to_string());
    config.wifi.documents_dir = Some(PathBuf::from("/docs"));

    // When: Building settings with overrides
    let settings = config.wifi_settings(Some("http://10.0.0.5:5000"), Some("iOS"));

    // Then: Overrides applied, base URL normalised
    assert_eq!(settings.base_url, "http://10.0.0.5:5000/");
    assert_eq!(settings.platform, "iOS");
    assert_eq!(settings.documents_dir, Path::new("/docs"));
}

/// WHAT: Without overrides the file values are used
/// WHY: The config file is the persistent default
#[test]
fn given_no_overrides_when_building_wifi_settings_then_file_values_used() {
    // Given: A config with a platform
    let mut config = Config::default();
    config.wifi.platform = Some("Android".to_string());

    // When: Building settings
    let settings = config.wifi_settings(None, None);

    // Then: File values
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.platform, "Android");
}
