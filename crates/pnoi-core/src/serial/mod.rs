mod framer;
pub(crate) mod port;

pub(crate) use framer::FrameSplitter;

pub use port::SerialPortTransport;

use crate::CoreResult;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// A paired device that can be selected for connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialDevice {
    /// Identifier passed to [`SerialTransport::connect`].
    pub address: String,
    /// Human-readable name shown in the selection list.
    pub name: String,
}

/// Serial-port capability used by the Bluetooth controller.
///
/// Every async call resolves exactly once, either to success or to an error.
/// Implementations add no retries or timeouts of their own.
#[async_trait]
pub trait SerialTransport: Send + Sync {
    /// Whether the Bluetooth adapter is switched on.
    async fn is_enabled(&self) -> bool;

    /// Enumerate paired devices.
    async fn list(&self) -> CoreResult<Vec<SerialDevice>>;

    /// Whether a connection is currently open.
    async fn is_connected(&self) -> bool;

    /// Open a connection to `address`.
    async fn connect(&mut self, address: &str) -> CoreResult<()>;

    /// Close the open connection.
    async fn disconnect(&mut self) -> CoreResult<()>;

    /// Start delivering incoming data split on `delimiter`.
    ///
    /// The returned channel closes when the subscription ends. Subscribing
    /// without an open connection yields an already-closed channel.
    fn subscribe(&mut self, delimiter: u8) -> mpsc::UnboundedReceiver<String>;

    /// Stop delivering incoming data.
    async fn unsubscribe(&mut self) -> CoreResult<()>;

    /// Send `payload` over the open connection.
    async fn write(&mut self, payload: &str) -> CoreResult<()>;
}
