use pnoi_core::CoreError;

use std::{panic::Location, result::Result as StdResult};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;
use tracing::warn;

/// Errors raised by the recorder binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// Serial transport error from pnoi-core.
    #[error("Core error: {source} {location}")]
    Core {
        /// The underlying core error.
        #[source]
        source: CoreError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// An external command could not be run or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason} {location}")]
    Command {
        /// Command line as configured.
        command: String,
        /// What went wrong.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from sockets or the filesystem.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

impl From<CoreError> for RecorderError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        RecorderError::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for RecorderError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        RecorderError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

// Handlers return RecorderResult; any failure is a 500 carrying the reason.
impl IntoResponse for RecorderError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Convenience type alias for Results using `RecorderError`.
pub type Result<T> = StdResult<T, RecorderError>;
