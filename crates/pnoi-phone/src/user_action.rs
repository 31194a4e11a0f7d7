/// Actions typed by the user, one per input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// List discovered devices.
    Devices,
    /// Select a device by zero-based index.
    Select(usize),
    /// Connect to, or disconnect from, the selected device.
    Connect,
    /// Start or stop recording.
    Record,
    /// Transfer the recording.
    Transfer,
    /// Show button captions.
    Status,
    /// Show available actions.
    Help,
    /// Leave the application.
    Quit,
}

impl UserAction {
    /// Parse one input line. Device numbers are typed one-based.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();

        let action = match verb.as_str() {
            "devices" | "list" => UserAction::Devices,
            "select" => {
                let number: usize = words.next()?.parse().ok()?;
                UserAction::Select(number.checked_sub(1)?)
            }
            "connect" | "disconnect" => UserAction::Connect,
            "record" | "start" | "stop" => UserAction::Record,
            "transfer" => UserAction::Transfer,
            "status" => UserAction::Status,
            "help" | "?" => UserAction::Help,
            "quit" | "exit" => UserAction::Quit,
            _ => return None,
        };

        if words.next().is_some() {
            return None;
        }

        Some(action)
    }
}

/// Whether a confirmation answer means yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
