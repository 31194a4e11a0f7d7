use crate::{CoreError, CoreResult};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    str::FromStr,
};

use error_location::ErrorLocation;

/// File name every transfer is saved under.
pub const RECORDING_FILE_NAME: &str = "recording.wav";

/// Shared download directory on Android devices.
pub const ANDROID_DOWNLOAD_DIR: &str = "file:///storage/emulated/0/Download/";

/// Phone platforms with a known download location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Saves into the shared Download directory.
    Android,
    /// Saves into the application's documents directory.
    Ios,
}

impl FromStr for Platform {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "Android" => Ok(Platform::Android),
            "iOS" => Ok(Platform::Ios),
            other => Err(CoreError::UnsupportedPlatform {
                platform: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Where a transfer is saved for `platform`.
///
/// Android resolves to a `file://` URL in the shared Download directory; iOS
/// resolves inside `documents_dir`. Other identifiers are rejected.
#[track_caller]
pub fn download_location(platform: &str, documents_dir: &Path) -> CoreResult<String> {
    match Platform::from_str(platform)? {
        Platform::Android => Ok(format!("{}{}", ANDROID_DOWNLOAD_DIR, RECORDING_FILE_NAME)),
        Platform::Ios => Ok(documents_dir
            .join(RECORDING_FILE_NAME)
            .to_string_lossy()
            .into_owned()),
    }
}

/// Filesystem path for a download location, dropping any `file://` scheme.
pub fn location_to_path(location: &str) -> PathBuf {
    PathBuf::from(location.strip_prefix("file://").unwrap_or(location))
}

/// Platform identifier for the host operating system.
///
/// Hosts other than Android and iOS map to their OS name, which
/// [`download_location`] rejects.
pub fn host_platform() -> String {
    match std::env::consts::OS {
        "android" => "Android".to_string(),
        "ios" => "iOS".to_string(),
        other => other.to_string(),
    }
}
