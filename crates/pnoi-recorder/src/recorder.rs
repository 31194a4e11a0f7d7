//! The external record process and the file it produces.

use crate::{RecorderError, RecorderResult};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::process::{Child, Command};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const FILE_PLACEHOLDER: &str = "{file}";

/// How long a terminated record process gets to finalise its file.
const STOP_GRACE: Duration = Duration::from_secs(3);

/// Owns at most one running record process.
pub struct Recorder {
    record_command: String,
    path: PathBuf,
    child: Option<Child>,
    session: Option<Uuid>,
}

impl Recorder {
    /// Recorder that runs `record_command` to write `path`.
    pub fn new(record_command: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            record_command: record_command.into(),
            path: path.into(),
            child: None,
            session: None,
        }
    }

    /// Whether a record process is running.
    pub fn is_recording(&self) -> bool {
        self.child.is_some()
    }

    /// Identifier of the current recording session, if any.
    pub fn session(&self) -> Option<Uuid> {
        self.session
    }

    /// File the record process writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Spawn the record process. Returns `false` when already recording.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> RecorderResult<bool> {
        if self.is_recording() {
            debug!("Start ignored, already recording");
            return Ok(false);
        }

        let mut command = build_command(&self.record_command, &self.path)?;
        let child = command
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| command_error(&self.record_command, e.to_string()))?;

        let session = Uuid::new_v4();
        info!(%session, pid = child.id(), path = ?self.path, "Recording started");

        self.child = Some(child);
        self.session = Some(session);

        Ok(true)
    }

    /// Terminate the record process, killing it if it outlives the grace
    /// period. Returns `false` when idle.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> RecorderResult<bool> {
        let Some(mut child) = self.child.take() else {
            debug!("Stop ignored, not recording");
            return Ok(false);
        };
        let session = self.session.take();

        match child.try_wait() {
            Ok(Some(status)) => {
                warn!(?session, %status, "Record process had already exited");
            }
            _ => {
                terminate(&mut child)
                    .await
                    .map_err(|e| command_error(&self.record_command, e.to_string()))?;
                info!(?session, "Recording stopped");
            }
        }

        Ok(true)
    }

    /// Run `transfer_command` against the recording and wait for it.
    #[instrument(skip(self))]
    pub async fn transfer(&self, transfer_command: &str) -> RecorderResult<()> {
        let status = build_command(transfer_command, &self.path)?
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| command_error(transfer_command, e.to_string()))?;

        if !status.success() {
            return Err(command_error(transfer_command, format!("exited with {}", status)));
        }

        info!(path = ?self.path, "Transfer complete");

        Ok(())
    }
}

/// Ask `child` to exit so recorders such as `arecord` can write their file
/// header, then kill it if it is still running after [`STOP_GRACE`].
async fn terminate(child: &mut Child) -> std::io::Result<()> {
    #[cfg(unix)]
    if let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) {
        use nix::{
            sys::signal::{Signal, kill},
            unistd::Pid,
        };

        match kill(Pid::from_raw(pid), Signal::SIGTERM) {
            Ok(()) => match tokio::time::timeout(STOP_GRACE, child.wait()).await {
                Ok(status) => {
                    let status = status?;
                    debug!(%status, "Record process exited");
                    return Ok(());
                }
                Err(_) => warn!(pid, "Record process ignored SIGTERM, killing"),
            },
            Err(e) => warn!(pid, error = %e, "SIGTERM failed, killing"),
        }
    }

    child.kill().await
}

/// Split `template` on whitespace and substitute `{file}` with `file`.
#[track_caller]
pub(crate) fn build_command(template: &str, file: &Path) -> RecorderResult<Command> {
    let file = file.to_string_lossy();
    let mut parts = template
        .split_whitespace()
        .map(|part| part.replace(FILE_PLACEHOLDER, &file));

    let Some(program) = parts.next() else {
        return Err(command_error(template, "empty command".to_string()));
    };

    let mut command = Command::new(program);
    command.args(parts);

    Ok(command)
}

#[track_caller]
fn command_error(command: &str, reason: String) -> RecorderError {
    RecorderError::Command {
        command: command.to_string(),
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
