use crate::{
    DEFAULT_BASE_URL, RecordingState, StatusLog, WifiController, WifiSettings,
    tests::fakes::{FakeConfirm, FakeHttp},
};

use std::path::PathBuf;

type Controller = WifiController<FakeHttp, StatusLog, FakeConfirm>;

const START_URL: &str = "http://192.168.4.1:5000/start";
const STOP_URL: &str = "http://192.168.4.1:5000/stop";
const TRANSFER_URL: &str = "http://192.168.4.1:5000/transfer";

fn settings(platform: &str) -> WifiSettings {
    WifiSettings {
        base_url: DEFAULT_BASE_URL.to_string(),
        platform: platform.to_string(),
        documents_dir: PathBuf::from("/var/mobile/Documents"),
    }
}

fn controller(http: FakeHttp, platform: &str, answer: bool) -> (Controller, FakeConfirm) {
    let confirm = FakeConfirm::answering(answer);
    (
        WifiController::new(http, StatusLog::new(), confirm.clone(), settings(platform)),
        confirm,
    )
}

async fn recording_controller(platform: &str, answer: bool) -> (Controller, FakeConfirm) {
    let (mut controller, confirm) = controller(FakeHttp::default(), platform, answer);
    controller.toggle_recording().await;
    assert_eq!(controller.recording_state(), RecordingState::Recording);
    (controller, confirm)
}

/// WHAT: Successful probe reports readiness
/// WHY: Startup confirms the server is reachable
#[tokio::test]
async fn given_reachable_server_when_probing_then_ready_message() {
    // Given: A server answering 200
    let (mut controller, _) = controller(FakeHttp::default(), "Android", true);

    // When: Probing
    controller.probe().await;

    // Then: The base URL was requested and readiness is shown
    assert_eq!(controller.transport().requested(), [DEFAULT_BASE_URL]);
    assert_eq!(
        controller.status().lines(),
        ["Connection established. Ready for commands"]
    );
}

/// WHAT: Unreachable server is shown and alerted
/// WHY: Wi-Fi errors raise a blocking alert in addition to the log line
#[tokio::test]
async fn given_unreachable_server_when_probing_then_error_shown_and_alerted() {
    // Given: A server that refuses connections
    let (mut controller, _) = controller(FakeHttp::unreachable(), "Android", true);

    // When: Probing
    controller.probe().await;

    // Then: One log line and one alert with the same message
    assert!(
        controller
            .status()
            .contains("Error: Can't connect to Pnoi server (")
    );
    assert_eq!(controller.status().alerts().len(), 1);
    assert_eq!(controller.status().alerts(), controller.status().lines());
}

/// WHAT: Start acknowledged with 200 flips the label
/// WHY: The caption follows the confirmed outcome
#[tokio::test]
async fn given_idle_when_start_acknowledged_then_label_reads_stop() {
    // Given: An idle controller
    let (mut controller, _) = controller(FakeHttp::default(), "Android", true);
    assert_eq!(controller.command_label(), "Start");

    // When: Toggling recording
    controller.toggle_recording().await;

    // Then: Recording, label "Stop", log shows the start message
    assert_eq!(controller.transport().requested(), [START_URL]);
    assert_eq!(controller.command_label(), "Stop");
    assert_eq!(controller.status().lines(), ["Recording started"]);
}

/// WHAT: Labels alternate across a start/stop cycle
/// WHY: Every acknowledged command moves the state exactly once
#[tokio::test]
async fn given_recording_when_stop_acknowledged_then_label_reads_start() {
    // Given: A recording session
    let (mut controller, _) = recording_controller("Android", true).await;

    // When: Toggling recording again
    controller.toggle_recording().await;

    // Then: Idle, label "Start", stop requested
    assert_eq!(controller.transport().requested(), [START_URL, STOP_URL]);
    assert_eq!(controller.command_label(), "Start");
    assert!(controller.status().contains("Recording stopped"));
}

/// WHAT: Non-200 start is ignored without message or state change
/// WHY: Only status 200 counts; other statuses fire neither path
#[tokio::test]
async fn given_server_error_status_when_starting_then_nothing_changes() {
    // Given: A server answering 500 to start
    let http = FakeHttp::default();
    http.set_status(START_URL, 500);
    let (mut controller, _) = controller(http, "Android", true);

    // When: Toggling recording
    controller.toggle_recording().await;

    // Then: Label stays "Start", no line, no alert
    assert_eq!(controller.command_label(), "Start");
    assert!(controller.status().lines().is_empty());
    assert!(controller.status().alerts().is_empty());
}

/// WHAT: Transport failure on stop keeps Recording
/// WHY: A lost acknowledgment is never reconciled automatically
#[tokio::test]
async fn given_recording_when_stop_fails_then_still_recording() {
    // Given: A recording session whose server then disappears
    let (mut controller, _) = recording_controller("Android", true).await;
    controller.transport().set_unreachable(true);

    // When: Toggling recording
    controller.toggle_recording().await;

    // Then: Still recording, error shown and alerted
    assert_eq!(controller.recording_state(), RecordingState::Recording);
    assert_eq!(controller.command_label(), "Stop");
    assert_eq!(controller.status().alerts().len(), 1);
}

/// WHAT: Android transfer downloads into the shared Download directory
/// WHY: Each platform has one fixed location
#[tokio::test]
async fn given_android_when_transferring_then_downloads_to_download_directory() {
    // Given: An idle Android controller
    let (mut controller, confirm) = controller(FakeHttp::default(), "Android", true);

    // When: Transferring
    controller.transfer().await;

    // Then: One download to the Android path, no stop, no prompt
    assert_eq!(
        controller.transport().downloaded(),
        [(
            TRANSFER_URL.to_string(),
            PathBuf::from("/storage/emulated/0/Download/recording.wav")
        )]
    );
    assert!(controller.transport().requested().is_empty());
    assert!(confirm.asked().is_empty());
    assert_eq!(
        controller.status().lines(),
        [
            "Downloading file to: file:///storage/emulated/0/Download/recording.wav",
            "Download complete",
        ]
    );
}

/// WHAT: iOS transfer downloads into the documents directory
/// WHY: iOS apps can only write inside their sandbox
#[tokio::test]
async fn given_ios_when_transferring_then_downloads_to_documents_directory() {
    // Given: An idle iOS controller
    let (mut controller, _) = controller(FakeHttp::default(), "iOS", true);

    // When: Transferring
    controller.transfer().await;

    // Then: Downloaded under the documents directory
    let downloads = controller.transport().downloaded();
    assert_eq!(downloads.len(), 1);
    assert_eq!(
        downloads[0].1,
        PathBuf::from("/var/mobile/Documents/recording.wav")
    );
}

/// WHAT: Unknown platform reports an error and downloads nothing
/// WHY: There is no safe default location
#[tokio::test]
async fn given_unsupported_platform_when_transferring_then_error_and_no_download() {
    // Given: A recording session on an unknown platform
    let (mut controller, confirm) = recording_controller("Windows", true).await;

    // When: Transferring
    controller.transfer().await;

    // Then: Error shown and alerted; no prompt, no stop, no download
    assert_eq!(
        controller.status().lines().last().map(String::as_str),
        Some("Unsupported device platform: Windows")
    );
    assert_eq!(
        controller.status().alerts(),
        ["Unsupported device platform: Windows"]
    );
    assert!(confirm.asked().is_empty());
    assert!(controller.transport().downloaded().is_empty());
    assert_eq!(controller.transport().requested(), [START_URL]);
}

/// WHAT: Confirmed transfer while recording stops once and downloads once
/// WHY: The user agreed to interrupt the recording
#[tokio::test]
async fn given_recording_when_transfer_confirmed_then_one_stop_and_one_download() {
    // Given: A recording session and a user who confirms
    let (mut controller, confirm) = recording_controller("Android", true).await;

    // When: Transferring
    controller.transfer().await;

    // Then: One stop, one download
    assert_eq!(controller.transport().requested(), [START_URL, STOP_URL]);
    assert_eq!(controller.transport().downloaded().len(), 1);
    assert_eq!(confirm.asked(), ["Do you want to stop the recording?"]);
    assert_eq!(controller.recording_state(), RecordingState::Idle);
}

/// WHAT: Declined transfer while recording does nothing
/// WHY: Recording must not be interrupted without consent
#[tokio::test]
async fn given_recording_when_transfer_declined_then_no_stop_and_no_download() {
    // Given: A recording session and a user who declines
    let (mut controller, _) = recording_controller("Android", false).await;

    // When: Transferring
    controller.transfer().await;

    // Then: Nothing beyond the first start
    assert_eq!(controller.transport().requested(), [START_URL]);
    assert!(controller.transport().downloaded().is_empty());
    assert_eq!(controller.recording_state(), RecordingState::Recording);
}

/// WHAT: Download follows even when the stop is ignored
/// WHY: The download is unconditional after a confirmed stop
#[tokio::test]
async fn given_stop_ignored_when_transfer_confirmed_then_download_still_runs() {
    // Given: A recording session whose stop answers 503
    let (mut controller, _) = recording_controller("Android", true).await;
    controller.transport().set_status(STOP_URL, 503);

    // When: Transferring
    controller.transfer().await;

    // Then: Still recording, download attempted anyway
    assert_eq!(controller.recording_state(), RecordingState::Recording);
    assert_eq!(controller.transport().downloaded().len(), 1);
}

/// WHAT: Failed download is shown and alerted
/// WHY: Every Wi-Fi failure raises an alert
#[tokio::test]
async fn given_download_failure_when_transferring_then_error_alerted() {
    // Given: Storage that rejects the download
    let http = FakeHttp::default();
    http.fail_downloads();
    let (mut controller, _) = controller(http, "Android", true);

    // When: Transferring
    controller.transfer().await;

    // Then: No completion message, one alert
    assert!(!controller.status().contains("Download complete"));
    assert!(controller.status().contains("read-only storage"));
    assert_eq!(controller.status().alerts().len(), 1);
}
