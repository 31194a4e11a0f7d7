use error_location::ErrorLocation;
use thiserror::Error;

/// Controller and transport errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The serial port could not be opened, read or written.
    #[error("Serial error: {reason} {location}")]
    Serial {
        /// Description of the serial failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A serial operation needed an open connection and none exists.
    #[error("Not connected {location}")]
    NotConnected {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The HTTP request could not be completed.
    #[error("HTTP request to {url} failed: {source} {location}")]
    Http {
        /// URL that was requested.
        url: String,
        /// Underlying error from reqwest.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client initialisation failed: {source} {location}")]
    HttpClient {
        /// Underlying error from reqwest.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The server answered a download with a non-success status.
    #[error("Download from {url} failed with status {status} {location}")]
    DownloadStatus {
        /// URL that was requested.
        url: String,
        /// HTTP status code returned.
        status: u16,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform has no known download location.
    #[error("Unsupported device platform: {platform} {location}")]
    UnsupportedPlatform {
        /// Platform identifier that was rejected.
        platform: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Filesystem operation failed.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::Io {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

impl CoreError {
    /// Message for the status log, without the source location.
    pub fn message(&self) -> String {
        match self {
            CoreError::Serial { reason, .. } => format!("Serial error: {}", reason),
            CoreError::NotConnected { .. } => "Not connected".to_string(),
            CoreError::Http { url, source, .. } => {
                format!("HTTP request to {} failed: {}", url, source)
            }
            CoreError::HttpClient { source, .. } => {
                format!("HTTP client initialisation failed: {}", source)
            }
            CoreError::DownloadStatus { url, status, .. } => {
                format!("Download from {} failed with status {}", url, status)
            }
            CoreError::UnsupportedPlatform { platform, .. } => {
                format!("Unsupported device platform: {}", platform)
            }
            CoreError::Io { source, .. } => format!("IO error: {}", source),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
