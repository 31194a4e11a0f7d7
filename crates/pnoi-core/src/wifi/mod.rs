//! Wi-Fi controller: recorder commands as HTTP GET requests.
//!
//! Only status 200 counts as an acknowledgment. Any other status is dropped
//! without a message and without a state change, so a failing server looks
//! exactly like a silent one.

mod platform;

pub use platform::{
    ANDROID_DOWNLOAD_DIR, Platform, RECORDING_FILE_NAME, download_location, host_platform,
    location_to_path,
};

use crate::{
    CoreResult, DeviceCommand, RecordingState,
    display::{Confirm, StatusDisplay},
    http::HttpTransport,
};

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

/// Default recorder address when it runs its own access point.
pub const DEFAULT_BASE_URL: &str = "http://192.168.4.1:5000/";

const HTTP_OK: u16 = 200;

/// Connection settings for a [`WifiController`].
#[derive(Debug, Clone)]
pub struct WifiSettings {
    /// Base URL that command suffixes are appended to.
    pub base_url: String,
    /// Platform identifier used to pick the download location.
    pub platform: String,
    /// Documents directory used on iOS.
    pub documents_dir: PathBuf,
}

/// Binds the record and transfer actions to the recorder's HTTP API.
pub struct WifiController<H, D, C> {
    transport: H,
    display: D,
    confirm: C,
    settings: WifiSettings,
    recording: RecordingState,
}

impl<H, D, C> WifiController<H, D, C>
where
    H: HttpTransport,
    D: StatusDisplay,
    C: Confirm,
{
    /// Create a controller in the idle state.
    pub fn new(transport: H, display: D, confirm: C, settings: WifiSettings) -> Self {
        Self {
            transport,
            display,
            confirm,
            settings,
            recording: RecordingState::Idle,
        }
    }

    /// Last confirmed recording state.
    pub fn recording_state(&self) -> RecordingState {
        self.recording
    }

    /// Caption of the command button.
    pub fn command_label(&self) -> &'static str {
        self.recording.button_label()
    }

    /// Status display the controller reports to.
    pub fn status(&self) -> &D {
        &self.display
    }

    /// Underlying HTTP transport.
    pub fn transport(&self) -> &H {
        &self.transport
    }

    /// Check that the server is reachable with an empty command.
    #[instrument(skip(self))]
    pub async fn probe(&mut self) {
        match self.send_command(DeviceCommand::Probe).await {
            Ok(Some(_)) => {
                self.display
                    .display("Connection established. Ready for commands");
                info!(base_url = %self.settings.base_url, "Recorder reachable");
            }
            Ok(None) => {}
            Err(e) => {
                self.show_error(&format!("Error: Can't connect to Pnoi server ({})", e.message()));
            }
        }
    }

    /// Send start or stop depending on the confirmed recording state.
    #[instrument(skip(self))]
    pub async fn toggle_recording(&mut self) {
        let (command, message, next) = match self.recording {
            RecordingState::Idle => (
                DeviceCommand::Start,
                "Recording started",
                RecordingState::Recording,
            ),
            RecordingState::Recording => (
                DeviceCommand::Stop,
                "Recording stopped",
                RecordingState::Idle,
            ),
        };

        match self.send_command(command).await {
            Ok(Some(_)) => {
                self.display.display(message);
                self.recording = next;
                info!(state = ?next, "Recording state changed");
            }
            Ok(None) => {}
            Err(e) => self.show_error(&e.message()),
        }
    }

    /// Download the recording, stopping it first if the user agrees.
    ///
    /// The stop is not awaited for success: the download follows it either
    /// way, as it would after a manual stop.
    #[instrument(skip(self))]
    pub async fn transfer(&mut self) {
        let location =
            match download_location(&self.settings.platform, &self.settings.documents_dir) {
                Ok(location) => location,
                Err(e) => {
                    self.show_error(&e.message());
                    return;
                }
            };

        if self.recording.is_recording() {
            if !self
                .confirm
                .confirm("Do you want to stop the recording?")
                .await
            {
                debug!("Transfer cancelled while recording");
                return;
            }
            self.toggle_recording().await;
        }

        self.download(&location).await;
    }

    async fn download(&mut self, location: &str) {
        self.display
            .display(&format!("Downloading file to: {}", location));

        let url = self.command_url(DeviceCommand::Transfer);
        let destination = location_to_path(location);

        match self.transport.download_file(&url, &destination).await {
            Ok(()) => self.display.display("Download complete"),
            Err(e) => self.show_error(&e.message()),
        }
    }

    /// Issue `command`; `Ok(Some(body))` only for status 200.
    async fn send_command(&self, command: DeviceCommand) -> CoreResult<Option<String>> {
        let url = self.command_url(command);
        let response = self.transport.send_request(&url).await?;

        if response.status == HTTP_OK {
            Ok(Some(response.data))
        } else {
            debug!(%command, status = response.status, "Non-200 response ignored");
            Ok(None)
        }
    }

    fn command_url(&self, command: DeviceCommand) -> String {
        format!("{}{}", self.settings.base_url, command.http_suffix())
    }

    fn show_error(&mut self, message: &str) {
        warn!(message, "Wi-Fi operation failed");
        self.display.display(message);
        self.display.alert(message);
    }
}
