/// Recording state as last confirmed by the recorder.
///
/// The command button caption is derived from this value, never the
/// other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    /// Not recording; the command button offers "Start".
    #[default]
    Idle,
    /// Recording; the command button offers "Stop".
    Recording,
}

impl RecordingState {
    /// Caption shown on the command button.
    pub fn button_label(self) -> &'static str {
        match self {
            RecordingState::Idle => "Start",
            RecordingState::Recording => "Stop",
        }
    }

    /// Whether the recorder has acknowledged a start without a later stop.
    pub fn is_recording(self) -> bool {
        matches!(self, RecordingState::Recording)
    }
}

/// Serial connection state as last confirmed by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No open connection; the connect button offers "Connect".
    #[default]
    Disconnected,
    /// Connected and subscribed; the connect button offers "Disconnect".
    Connected,
}

impl ConnectionState {
    /// Caption shown on the connect button.
    pub fn button_label(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Connect",
            ConnectionState::Connected => "Disconnect",
        }
    }
}
