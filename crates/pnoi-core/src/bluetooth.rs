//! Bluetooth controller: recorder commands over a serial link.
//!
//! Every action takes `&mut self`, so a second tap on a button waits for the
//! first action to resolve and then sees the state that action left behind.

use crate::{
    CoreResult, DeviceCommand, RecordingState,
    display::{Confirm, StatusDisplay},
    recording_state::ConnectionState,
    serial::{SerialDevice, SerialTransport},
};

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Frame delimiter for incoming data.
pub const DATA_DELIMITER: u8 = b'\n';

/// Binds connect, record and transfer actions to a serial transport.
pub struct BluetoothController<T, D, C> {
    transport: T,
    display: D,
    confirm: C,
    address: String,
    devices: Vec<SerialDevice>,
    selected: Option<usize>,
    connection: ConnectionState,
    recording: RecordingState,
    incoming: Option<mpsc::UnboundedReceiver<String>>,
}

impl<T, D, C> BluetoothController<T, D, C>
where
    T: SerialTransport,
    D: StatusDisplay,
    C: Confirm,
{
    /// Create a disconnected, idle controller.
    pub fn new(transport: T, display: D, confirm: C) -> Self {
        Self {
            transport,
            display,
            confirm,
            address: String::new(),
            devices: Vec::new(),
            selected: None,
            connection: ConnectionState::Disconnected,
            recording: RecordingState::Idle,
            incoming: None,
        }
    }

    /// Devices found by the last discovery.
    pub fn devices(&self) -> &[SerialDevice] {
        &self.devices
    }

    /// Select the device at `index` for the next connect.
    ///
    /// Returns `false` and keeps the current selection when out of range.
    pub fn select_device(&mut self, index: usize) -> bool {
        if index < self.devices.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Address of the selected device, empty when nothing is selected.
    pub fn selected_address(&self) -> &str {
        self.selected
            .and_then(|i| self.devices.get(i))
            .map(|d| d.address.as_str())
            .unwrap_or("")
    }

    /// Address used by the last connect attempt.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Last confirmed recording state.
    pub fn recording_state(&self) -> RecordingState {
        self.recording
    }

    /// Caption of the command button.
    pub fn command_label(&self) -> &'static str {
        self.recording.button_label()
    }

    /// Caption of the connect button.
    pub fn connect_label(&self) -> &'static str {
        self.connection.button_label()
    }

    /// Status display the controller reports to.
    pub fn status(&self) -> &D {
        &self.display
    }

    /// Underlying serial transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Hand over the receiver for incoming data, if subscribed.
    ///
    /// Feed each received frame back through [`Self::show_incoming`].
    pub fn take_incoming(&mut self) -> Option<mpsc::UnboundedReceiver<String>> {
        self.incoming.take()
    }

    /// Populate the device list if the adapter is on.
    #[instrument(skip(self))]
    pub async fn discover(&mut self) {
        self.display
            .display("Finding all available Bluetooth devices...");

        if self.transport.is_enabled().await {
            match self.transport.list().await {
                Ok(devices) => {
                    info!(count = devices.len(), "Devices discovered");
                    self.selected = if devices.is_empty() { None } else { Some(0) };
                    self.devices = devices;
                }
                Err(e) => self.show_error(&e.message()),
            }
        } else {
            self.display.display("Bluetooth is not enabled.");
        }

        self.display.display("Completed device discovery");
    }

    /// Connect to the selected device, or disconnect after confirmation.
    ///
    /// The connection status is queried fresh on every call.
    #[instrument(skip(self))]
    pub async fn toggle_connection(&mut self) {
        if self.transport.is_connected().await {
            self.disconnect().await;
        } else {
            self.connect().await;
        }
    }

    async fn connect(&mut self) {
        self.address = self.selected_address().to_string();
        self.display.clear();
        self.display.display(&format!(
            "Attempting to connect to {}... Make sure the serial port is open on the target device.",
            self.address
        ));

        let address = self.address.clone();
        match self.transport.connect(&address).await {
            Ok(()) => self.open_port(),
            Err(e) => self.show_error(&e.message()),
        }
    }

    fn open_port(&mut self) {
        self.display
            .display(&format!("Connected to: {}", self.address));
        self.incoming = Some(self.transport.subscribe(DATA_DELIMITER));
        self.connection = ConnectionState::Connected;
        info!(address = %self.address, "Connected");
    }

    async fn disconnect(&mut self) {
        if !self
            .confirm
            .confirm("Are you sure you want to disconnect?")
            .await
        {
            debug!("Disconnect declined");
            return;
        }

        self.display.display("attempting to disconnect");

        match self.transport.disconnect().await {
            Ok(()) => self.close_port().await,
            Err(e) => self.show_error(&e.message()),
        }
    }

    async fn close_port(&mut self) {
        self.display
            .display(&format!("Disconnected from: {}", self.address));
        self.connection = ConnectionState::Disconnected;
        self.incoming = None;
        info!(address = %self.address, "Disconnected");

        if let Err(e) = self.transport.unsubscribe().await {
            self.show_error(&e.message());
        }
    }

    /// Send start or stop depending on the confirmed recording state.
    #[instrument(skip(self))]
    pub async fn toggle_recording(&mut self) {
        let (command, message, next) = match self.recording {
            RecordingState::Idle => (
                DeviceCommand::Start,
                "Starting recording...",
                RecordingState::Recording,
            ),
            RecordingState::Recording => (
                DeviceCommand::Stop,
                "Stopping recording",
                RecordingState::Idle,
            ),
        };

        match self.send(command).await {
            Ok(()) => {
                self.display.display(message);
                self.recording = next;
                info!(state = ?next, "Recording state changed");
            }
            Err(e) => self.show_error(&e.message()),
        }
    }

    /// Ask the recorder to send its file, stopping first if the user agrees.
    ///
    /// The transfer command follows the stop whatever the stop's outcome.
    #[instrument(skip(self))]
    pub async fn transfer(&mut self) {
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

        match self.send(DeviceCommand::Transfer).await {
            Ok(()) => self.display.display("Transferring..."),
            Err(e) => self.show_error(&e.message()),
        }
    }

    /// Replace the log with one frame received from the recorder.
    pub fn show_incoming(&mut self, data: &str) {
        self.display.clear();
        self.display.display(data);
    }

    async fn send(&mut self, command: DeviceCommand) -> CoreResult<()> {
        let frame = command.serial_frame().unwrap_or_default();
        self.transport.write(frame).await
    }

    fn show_error(&mut self, message: &str) {
        warn!(message, "Bluetooth operation failed");
        self.display.display(message);
    }
}
