use crate::{
    AppResult, ConsoleConfirm, ConsoleDisplay, UserAction,
    cli::{Variant, WifiArgs},
    config::Config,
    input::{SharedInput, next_line},
};

use std::future::pending;

use pnoi_core::{
    BluetoothController, Confirm, HttpTransport, ReqwestTransport, SerialPortTransport,
    SerialTransport, StatusDisplay, WifiController,
};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

const BLUETOOTH_HELP: &str = "Actions: devices | select <n> | connect | record | transfer | status | help | quit";
const WIFI_HELP: &str = "Actions: record | transfer | status | help | quit";

/// Main application state.
///
/// Owns the configuration and the user's input stream; builds exactly one
/// controller for the chosen variant and feeds it actions one at a time.
pub struct App {
    pub(crate) config: Config,
    pub(crate) input: SharedInput,
}

impl App {
    /// Run the chosen variant until the user quits or input closes.
    #[instrument(skip(self))]
    pub(crate) async fn run(self, variant: Variant) -> AppResult<()> {
        info!("Pnoi phone starting");

        match variant {
            Variant::Bluetooth => {
                let transport = SerialPortTransport::new(
                    &self.config.bluetooth.adapter_path,
                    self.config.bluetooth.baud_rate,
                );
                let controller = BluetoothController::new(
                    transport,
                    ConsoleDisplay::stdout(),
                    ConsoleConfirm::stdout(self.input.clone()),
                );
                run_bluetooth(controller, &self.input).await;
            }
            Variant::Wifi(args) => {
                let WifiArgs { base_url, platform } = args;
                let settings = self
                    .config
                    .wifi_settings(base_url.as_deref(), platform.as_deref());
                info!(base_url = %settings.base_url, platform = %settings.platform, "Wi-Fi variant");

                let controller = WifiController::new(
                    ReqwestTransport::new()?,
                    ConsoleDisplay::stdout(),
                    ConsoleConfirm::stdout(self.input.clone()),
                    settings,
                );
                run_wifi(controller, &self.input).await;
            }
        }

        info!("Pnoi phone shut down");

        Ok(())
    }
}

/// Drive a Bluetooth controller from user input and incoming serial data.
pub(crate) async fn run_bluetooth<T, D, C>(
    mut controller: BluetoothController<T, D, C>,
    input: &SharedInput,
) -> BluetoothController<T, D, C>
where
    T: SerialTransport,
    D: StatusDisplay,
    C: Confirm,
{
    controller.discover().await;
    print_devices(&controller);
    println!("{}", BLUETOOTH_HELP);

    let mut incoming: Option<mpsc::UnboundedReceiver<String>> = None;

    loop {
        tokio::select! {
            line = next_line(input) => {
                let Some(line) = line else {
                    info!("Input closed");
                    break;
                };
                let Some(action) = UserAction::parse(&line) else {
                    println!("Unknown action {:?}. {}", line.trim(), BLUETOOTH_HELP);
                    continue;
                };

                match action {
                    UserAction::Devices => print_devices(&controller),
                    UserAction::Select(index) => {
                        if controller.select_device(index) {
                            println!("Selected {}", controller.selected_address());
                        } else {
                            println!("No device number {}", index + 1);
                        }
                    }
                    UserAction::Connect => {
                        controller.toggle_connection().await;
                        if let Some(rx) = controller.take_incoming() {
                            incoming = Some(rx);
                        } else if controller.connect_label() == "Connect" {
                            incoming = None;
                        }
                    }
                    UserAction::Record => controller.toggle_recording().await,
                    UserAction::Transfer => controller.transfer().await,
                    UserAction::Status => println!(
                        "[{}] [{}]",
                        controller.connect_label(),
                        controller.command_label()
                    ),
                    UserAction::Help => println!("{}", BLUETOOTH_HELP),
                    UserAction::Quit => break,
                }
            }
            frame = next_frame(&mut incoming) => match frame {
                Some(frame) => controller.show_incoming(&frame),
                None => {
                    warn!("Serial data stream ended");
                    incoming = None;
                }
            },
        }
    }

    controller
}

/// Drive a Wi-Fi controller from user input.
pub(crate) async fn run_wifi<H, D, C>(
    mut controller: WifiController<H, D, C>,
    input: &SharedInput,
) -> WifiController<H, D, C>
where
    H: HttpTransport,
    D: StatusDisplay,
    C: Confirm,
{
    controller.probe().await;
    println!("{}", WIFI_HELP);

    while let Some(line) = next_line(input).await {
        match UserAction::parse(&line) {
            Some(UserAction::Record) => controller.toggle_recording().await,
            Some(UserAction::Transfer) => controller.transfer().await,
            Some(UserAction::Status) => println!("[{}]", controller.command_label()),
            Some(UserAction::Help) => println!("{}", WIFI_HELP),
            Some(UserAction::Quit) => break,
            Some(other) => println!("{:?} is only available over Bluetooth. {}", other, WIFI_HELP),
            None => println!("Unknown action {:?}. {}", line.trim(), WIFI_HELP),
        }
    }

    controller
}

/// Next incoming frame; never resolves while unsubscribed.
async fn next_frame(incoming: &mut Option<mpsc::UnboundedReceiver<String>>) -> Option<String> {
    match incoming {
        Some(rx) => rx.recv().await,
        None => pending().await,
    }
}

fn print_devices<T, D, C>(controller: &BluetoothController<T, D, C>)
where
    T: SerialTransport,
    D: StatusDisplay,
    C: Confirm,
{
    if controller.devices().is_empty() {
        println!("No devices.");
        return;
    }

    for (i, device) in controller.devices().iter().enumerate() {
        let marker = if device.address == controller.selected_address() {
            "*"
        } else {
            " "
        };
        println!("{} {}. {} ({})", marker, i + 1, device.name, device.address);
    }
}
