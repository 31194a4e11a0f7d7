//! Commands understood by the recorder, in both wire forms.
//!
//! The Bluetooth variant frames commands as newline-terminated ASCII lines;
//! the Wi-Fi variant appends a path suffix to the server base URL.

use std::fmt;

/// A command sent from the phone to the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Empty request used to check that the server is reachable.
    Probe,
    /// Begin capturing audio.
    Start,
    /// Stop capturing audio.
    Stop,
    /// Hand the last recording over to the phone.
    Transfer,
}

impl DeviceCommand {
    /// Newline-terminated serial frame, or `None` for commands that only
    /// exist over HTTP.
    pub fn serial_frame(self) -> Option<&'static str> {
        match self {
            DeviceCommand::Probe => None,
            DeviceCommand::Start => Some("CMD_START\n"),
            DeviceCommand::Stop => Some("CMD_STOP\n"),
            DeviceCommand::Transfer => Some("CMD_TRANSFER\n"),
        }
    }

    /// Path suffix appended to the server base URL.
    pub fn http_suffix(self) -> &'static str {
        match self {
            DeviceCommand::Probe => "",
            DeviceCommand::Start => "start",
            DeviceCommand::Stop => "stop",
            DeviceCommand::Transfer => "transfer",
        }
    }

    /// Parse one received serial line. Surrounding whitespace is ignored.
    pub fn parse_serial_line(line: &str) -> Option<Self> {
        match line.trim() {
            "CMD_START" => Some(DeviceCommand::Start),
            "CMD_STOP" => Some(DeviceCommand::Stop),
            "CMD_TRANSFER" => Some(DeviceCommand::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceCommand::Probe => "probe",
            DeviceCommand::Start => "start",
            DeviceCommand::Stop => "stop",
            DeviceCommand::Transfer => "transfer",
        };
        f.write_str(name)
    }
}
