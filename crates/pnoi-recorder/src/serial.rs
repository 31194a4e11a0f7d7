//! Serial command listener for the Bluetooth variant.

use crate::{Recorder, RecorderResult};

use std::time::Duration;

use pnoi_core::{DATA_DELIMITER, DeviceCommand, SerialPortTransport, SerialTransport};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Pause before reopening the device after a session ends or fails to open.
const REOPEN_DELAY: Duration = Duration::from_secs(1);

/// Serial listener settings.
#[derive(Debug, Clone)]
pub struct SerialSettings {
    /// Device node to open.
    pub device: String,
    /// Port speed.
    pub baud_rate: u32,
    /// Command run on `CMD_TRANSFER`.
    pub transfer_command: String,
}

/// Accept sessions on the configured device until Ctrl-C.
///
/// Each session lasts until its line stream ends; the device is then
/// reopened for the next phone.
#[instrument(skip(recorder))]
pub async fn serve(settings: &SerialSettings, recorder: &mut Recorder) -> RecorderResult<()> {
    // Adapter discovery is the phone's concern; only the port is used here.
    let mut transport = SerialPortTransport::new("", settings.baud_rate);

    let sessions = async {
        loop {
            if let Err(e) = run_session(&mut transport, settings, recorder).await {
                warn!(error = %e, "Serial session failed");
            }
            tokio::time::sleep(REOPEN_DELAY).await;
        }
    };

    tokio::select! {
        _ = sessions => {}
        _ = tokio::signal::ctrl_c() => info!("Shutdown requested"),
    }

    recorder.stop().await?;

    Ok(())
}

/// Open the device, handle commands until the stream ends, then close it.
#[instrument(skip_all, fields(device = %settings.device))]
pub async fn run_session<T: SerialTransport>(
    transport: &mut T,
    settings: &SerialSettings,
    recorder: &mut Recorder,
) -> RecorderResult<()> {
    transport.connect(&settings.device).await?;
    info!("Listening for commands");

    let mut lines = transport.subscribe(DATA_DELIMITER);
    listen(&mut lines, recorder, &settings.transfer_command).await;

    info!("Disconnected. Ending session...");

    transport.unsubscribe().await?;
    if transport.is_connected().await {
        transport.disconnect().await?;
    }

    Ok(())
}

/// Handle command lines until the stream ends.
///
/// Failures are logged per command and never end the session.
pub async fn listen(
    lines: &mut mpsc::UnboundedReceiver<String>,
    recorder: &mut Recorder,
    transfer_command: &str,
) {
    while let Some(line) = lines.recv().await {
        debug!(line, "Received");

        let Some(command) = DeviceCommand::parse_serial_line(&line) else {
            warn!(line, "Unknown command");
            continue;
        };

        if let Err(e) = handle(command, recorder, transfer_command).await {
            warn!(%command, error = %e, "Command failed");
        }
    }
}

async fn handle(
    command: DeviceCommand,
    recorder: &mut Recorder,
    transfer_command: &str,
) -> RecorderResult<()> {
    match command {
        DeviceCommand::Start => {
            info!("Starting recording...");
            recorder.start()?;
        }
        DeviceCommand::Stop => {
            info!("Stopping recording...");
            recorder.stop().await?;
        }
        DeviceCommand::Transfer if recorder.is_recording() => {
            warn!("Transfer refused while recording");
        }
        DeviceCommand::Transfer => {
            info!("Transferring file...");
            recorder.transfer(transfer_command).await?;
        }
        DeviceCommand::Probe => debug!("Probe ignored"),
    }

    Ok(())
}
