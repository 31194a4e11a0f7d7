use crate::config::default_base_url;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Wi-Fi recorder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiConfig {
    /// Recorder base URL; command names are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Platform identifier ("Android" or "iOS"). None = derive from host OS.
    #[serde(default)]
    pub platform: Option<String>,

    /// Documents directory used on iOS. None = the user's documents folder.
    #[serde(default)]
    pub documents_dir: Option<PathBuf>,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            platform: None,
            documents_dir: None,
        }
    }
}
