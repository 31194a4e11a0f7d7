use crate::DeviceCommand;

/// WHAT: Serial frames are newline-terminated literals
/// WHY: The recorder matches whole lines
#[test]
fn given_commands_when_framing_for_serial_then_literal_lines() {
    // Given/When/Then: Each command maps to its literal frame
    assert_eq!(DeviceCommand::Start.serial_frame(), Some("CMD_START\n"));
    assert_eq!(DeviceCommand::Stop.serial_frame(), Some("CMD_STOP\n"));
    assert_eq!(DeviceCommand::Transfer.serial_frame(), Some("CMD_TRANSFER\n"));
    assert_eq!(DeviceCommand::Probe.serial_frame(), None);
}

/// WHAT: HTTP suffixes match the server routes
/// WHY: The probe hits the base URL itself
#[test]
fn given_commands_when_building_http_suffix_then_route_names() {
    // Given/When/Then: Each command maps to its route
    assert_eq!(DeviceCommand::Probe.http_suffix(), "");
    assert_eq!(DeviceCommand::Start.http_suffix(), "start");
    assert_eq!(DeviceCommand::Stop.http_suffix(), "stop");
    assert_eq!(DeviceCommand::Transfer.http_suffix(), "transfer");
}

/// WHAT: Received lines parse with surrounding whitespace
/// WHY: Senders may append CR or spaces
#[test]
fn given_padded_lines_when_parsing_then_commands_recognised() {
    // Given: Lines with stray whitespace
    let lines = ["CMD_START\r\n", "  CMD_STOP", "CMD_TRANSFER\n"];

    // When: Parsing each line
    let parsed: Vec<_> = lines
        .iter()
        .map(|l| DeviceCommand::parse_serial_line(l))
        .collect();

    // Then: All three are recognised
    assert_eq!(
        parsed,
        [
            Some(DeviceCommand::Start),
            Some(DeviceCommand::Stop),
            Some(DeviceCommand::Transfer)
        ]
    );
}

/// WHAT: Unknown or lowercase lines are rejected
/// WHY: Only the exact literals are commands
#[test]
fn given_unknown_lines_when_parsing_then_none() {
    // Given/When/Then: Near misses are not commands
    assert_eq!(DeviceCommand::parse_serial_line("cmd_start"), None);
    assert_eq!(DeviceCommand::parse_serial_line("CMD_PAUSE"), None);
    assert_eq!(DeviceCommand::parse_serial_line(""), None);
}
