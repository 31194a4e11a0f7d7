//! Serial transport over an RFCOMM serial port.
//!
//! Bluetooth SPP devices bound with `rfcomm` show up as ordinary serial
//! ports, so the `serialport` crate covers open, read and write. Reading
//! happens on a dedicated thread that forwards frames to the async side.

use crate::{
    CoreError, CoreResult,
    serial::{FrameSplitter, SerialDevice, SerialTransport},
};

use std::{
    io::{ErrorKind, Read, Write},
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::Duration,
};

use async_trait::async_trait;
use error_location::ErrorLocation;
use serialport::{SerialPort, SerialPortType};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Read timeout for the port. Bounds how long the reader thread takes to
/// notice an unsubscribe.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

const READ_CHUNK: usize = 256;

struct Reader {
    stop: Arc<AtomicBool>,
    /// Cleared by the thread when it exits for any reason.
    alive: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

/// [`SerialTransport`] backed by a local serial port.
pub struct SerialPortTransport {
    adapter_path: PathBuf,
    baud_rate: u32,
    port: Mutex<Option<Box<dyn SerialPort>>>,
    reader: Option<Reader>,
}

impl SerialPortTransport {
    /// Create a transport.
    ///
    /// `adapter_path` is a directory listing Bluetooth adapters (on Linux,
    /// `/sys/class/bluetooth`); the adapter counts as enabled when it has
    /// at least one entry.
    pub fn new(adapter_path: impl Into<PathBuf>, baud_rate: u32) -> Self {
        Self {
            adapter_path: adapter_path.into(),
            baud_rate,
            port: Mutex::new(None),
            reader: None,
        }
    }

    #[track_caller]
    fn lock_port(&self) -> CoreResult<MutexGuard<'_, Option<Box<dyn SerialPort>>>> {
        self.port.lock().map_err(|_| CoreError::Serial {
            reason: "Serial port lock poisoned".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn stop_reader(&self) {
        if let Some(reader) = &self.reader {
            reader.stop.store(true, Ordering::Release);
        }
    }
}

#[async_trait]
impl SerialTransport for SerialPortTransport {
    #[instrument(skip(self))]
    async fn is_enabled(&self) -> bool {
        let mut entries = match tokio::fs::read_dir(&self.adapter_path).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!(adapter_path = ?self.adapter_path, error = %e, "Adapter directory unavailable");
                return false;
            }
        };

        matches!(entries.next_entry().await, Ok(Some(_)))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CoreResult<Vec<SerialDevice>> {
        let ports = serialport::available_ports().map_err(|e| CoreError::Serial {
            reason: format!("Failed to enumerate serial ports: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let devices: Vec<SerialDevice> = ports
            .into_iter()
            .filter(|p| {
                matches!(p.port_type, SerialPortType::BluetoothPort)
                    || p.port_name.contains("rfcomm")
            })
            .map(|p| SerialDevice {
                name: device_name(&p.port_name),
                address: p.port_name,
            })
            .collect();

        info!(count = devices.len(), "Serial devices listed");

        Ok(devices)
    }

    async fn is_connected(&self) -> bool {
        let Ok(mut port) = self.lock_port() else {
            return false;
        };

        // A reader that ended on its own means the peer is gone.
        let link_lost = self
            .reader
            .as_ref()
            .is_some_and(|reader| !reader.alive.load(Ordering::Acquire));
        if link_lost && port.take().is_some() {
            info!("Serial link lost, port released");
        }

        port.is_some()
    }

    #[instrument(skip(self))]
    async fn connect(&mut self, address: &str) -> CoreResult<()> {
        let path = address.to_string();
        let baud_rate = self.baud_rate;

        // Opening an RFCOMM node blocks until the remote side answers.
        let opened = tokio::task::spawn_blocking(move || {
            serialport::new(path, baud_rate)
                .timeout(READ_TIMEOUT)
                .open()
        })
        .await
        .map_err(|e| CoreError::Serial {
            reason: format!("Connect task panicked: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
        .map_err(|e| CoreError::Serial {
            reason: format!("Failed to open {}: {}", address, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // A reader left over from a lost link must not judge the new port.
        if let Some(stale) = self.reader.take() {
            stale.stop.store(true, Ordering::Release);
        }
        *self.lock_port()? = Some(opened);

        info!(address, baud_rate, "Serial port opened");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn disconnect(&mut self) -> CoreResult<()> {
        let closed = self.lock_port()?.take();
        if closed.is_none() {
            return Err(CoreError::NotConnected {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // The reader holds its own handle; it closes once it sees the flag.
        self.stop_reader();

        info!("Serial port closed");

        Ok(())
    }

    fn subscribe(&mut self, delimiter: u8) -> mpsc::UnboundedReceiver<String> {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();

        let cloned = match self.lock_port() {
            Ok(port) => port.as_ref().map(|p| p.try_clone()),
            Err(e) => {
                warn!(error = ?e, "Cannot subscribe");
                return frame_rx;
            }
        };

        let mut port = match cloned {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                warn!(error = %e, "Failed to clone serial port for reading");
                return frame_rx;
            }
            None => {
                warn!("Subscribe requested without an open connection");
                return frame_rx;
            }
        };

        self.stop_reader();

        let stop = Arc::new(AtomicBool::new(false));
        let alive = Arc::new(AtomicBool::new(true));
        let reader_stop = Arc::clone(&stop);
        let reader_alive = Arc::clone(&alive);

        let thread = std::thread::spawn(move || {
            read_frames(&mut port, delimiter, &frame_tx, &reader_stop);
            reader_alive.store(false, Ordering::Release);
            // Subscribers see the stream end only after the link reads as lost.
            drop(frame_tx);
        });

        self.reader = Some(Reader {
            stop,
            alive,
            thread,
        });

        debug!(delimiter, "Subscribed to serial data");

        frame_rx
    }

    #[instrument(skip(self))]
    async fn unsubscribe(&mut self) -> CoreResult<()> {
        let Some(reader) = self.reader.take() else {
            return Ok(());
        };

        reader.stop.store(true, Ordering::Release);

        tokio::task::spawn_blocking(move || reader.thread.join())
            .await
            .map_err(|e| CoreError::Serial {
                reason: format!("Unsubscribe task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .map_err(|_| CoreError::Serial {
                reason: "Serial reader thread panicked".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!("Unsubscribed from serial data");

        Ok(())
    }

    #[instrument(skip(self, payload))]
    async fn write(&mut self, payload: &str) -> CoreResult<()> {
        let mut guard = self.lock_port()?;
        let port = guard.as_mut().ok_or_else(|| CoreError::NotConnected {
            location: ErrorLocation::from(Location::caller()),
        })?;

        port.write_all(payload.as_bytes())
            .and_then(|()| port.flush())
            .map_err(|e| CoreError::Serial {
                reason: format!("Failed to write: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(bytes = payload.len(), "Serial payload written");

        Ok(())
    }
}

/// Forward delimited frames from `source` until end of stream, a read error,
/// a dropped subscriber or `stop`.
pub(crate) fn read_frames<R: Read>(
    source: &mut R,
    delimiter: u8,
    frame_tx: &mpsc::UnboundedSender<String>,
    stop: &AtomicBool,
) {
    let mut splitter = FrameSplitter::new(delimiter);
    let mut chunk = [0u8; READ_CHUNK];

    'read: while !stop.load(Ordering::Acquire) {
        match source.read(&mut chunk) {
            Ok(0) => {
                info!("Serial peer closed the link");
                break;
            }
            Ok(n) => {
                for frame in splitter.push(&chunk[..n]) {
                    if frame_tx.send(frame).is_err() {
                        debug!("Subscriber dropped, stopping reader");
                        break 'read;
                    }
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => continue,
            Err(e) => {
                warn!(error = %e, "Serial read failed, stopping reader");
                break;
            }
        }
    }

    debug!(discarded = splitter.pending(), "Serial reader stopped");
}

/// Display name for a port: its file name, or the full name when it has none.
pub(crate) fn device_name(port_name: &str) -> String {
    Path::new(port_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| port_name.to_string())
}
