//! # bluereceipt CLI
//!
//! Command-line front end for the print screen.
//!
//! ## Usage
//!
//! ```bash
//! # List paired devices
//! bluereceipt devices
//!
//! # Print the demo receipt to a printer
//! bluereceipt print --device BT-600M
//!
//! # Print a custom order
//! bluereceipt print --device BT-600M --order order.json
//!
//! # Save receipt bytes instead of printing
//! bluereceipt receipt --out receipt.bin
//!
//! # Preview as text
//! bluereceipt receipt --plain
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bluereceipt::{
    BlueReceiptError, Order, PrintWorkflow, PrinterConfig,
    app::PrinterApp,
    config::{AppConfig, PlatformMode},
    permission::{BLUETOOTH_CONNECT_REQUEST, PermissionState},
    platform::{BluetoothPlatform, SimulatedPlatform},
    printer::ReceiptEncoding,
};

/// How long `print` waits for a permission answer.
const PERMISSION_TIMEOUT: Duration = Duration::from_secs(10);

/// bluereceipt - Bluetooth receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "bluereceipt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bluetooth platform
    #[arg(long, global = true, env = "BLUERECEIPT_PLATFORM")]
    platform: Option<PlatformMode>,

    /// RFCOMM channel of the printer's SPP service (default 1)
    #[arg(long, global = true)]
    channel: Option<u8>,

    /// Paper preset ("58mm", "80mm") or column count
    #[arg(long, global = true, value_parser = PrinterConfig::parse)]
    paper: Option<PrinterConfig>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List paired Bluetooth devices
    Devices,

    /// Print a receipt to a paired printer
    Print {
        /// Printer name (defaults to the preferred printer, if paired)
        #[arg(long)]
        device: Option<String>,

        /// Order JSON file (defaults to the demo order)
        #[arg(long, value_name = "FILE")]
        order: Option<PathBuf>,
    },

    /// Render receipt bytes without printing
    Receipt {
        /// Plain text instead of ESC/POS
        #[arg(long)]
        plain: bool,

        /// Order JSON file (defaults to the demo order)
        #[arg(long, value_name = "FILE")]
        order: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Check Bluetooth permission, requesting it if needed
    Permission,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "bluereceipt=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but did not succeed.
fn run() -> Result<bool, BlueReceiptError> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Devices => {
            let workflow = PrintWorkflow::new(config.build_platform()?);
            let devices = workflow.list_paired_devices()?;
            if devices.is_empty() {
                println!("No paired devices (is Bluetooth enabled?)");
            }
            for device in devices {
                println!("{}\t{}", device.name, device.address);
            }
            Ok(true)
        }

        Commands::Print { device, order } => {
            let platform = config.build_platform()?;
            let permissions = config.build_permissions(platform.as_ref());
            let workflow = build_workflow(&config, platform, order.as_ref())?;
            let mut app =
                PrinterApp::new(workflow, permissions, config.preferred_printer.as_deref());

            app.on_resume();
            if app.permission_pending() {
                println!("{}", app.status());
                app.wait_permission(PERMISSION_TIMEOUT);
            }
            if let Some(name) = device {
                app.select(&name);
            }

            let outcome = app.on_print();
            println!("{}", app.status());
            Ok(outcome.is_success())
        }

        Commands::Receipt { plain, order, out } => {
            // Rendering never touches Bluetooth.
            let platform: Box<dyn BluetoothPlatform> = Box::new(SimulatedPlatform::new());
            let mut workflow = build_workflow(&config, platform, order.as_ref())?;
            if plain {
                workflow = workflow.with_encoding(ReceiptEncoding::PlainText);
            } else if config.encoding.is_none() {
                workflow = workflow.with_encoding(ReceiptEncoding::EscPos);
            }

            let receipt = workflow.generate_receipt();
            match out {
                Some(path) => {
                    fs::write(&path, receipt.as_bytes())?;
                    println!("Wrote {} bytes to {}", receipt.len(), path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(receipt.as_bytes())?;
                    stdout.flush()?;
                }
            }
            Ok(true)
        }

        Commands::Permission => {
            let platform = config.build_platform()?;
            let gate = config.build_permissions(platform.as_ref());
            let state = match gate.check() {
                PermissionState::Granted => PermissionState::Granted,
                PermissionState::Denied => {
                    println!("Requesting Bluetooth permission...");
                    gate.request(BLUETOOTH_CONNECT_REQUEST)
                        .wait(PERMISSION_TIMEOUT)
                        .unwrap_or(PermissionState::Denied)
                }
            };
            println!("Bluetooth permission: {:?}", state);
            Ok(state == PermissionState::Granted)
        }
    }
}

/// Defaults, then the config file, then flags.
fn load_config(cli: &Cli) -> Result<AppConfig, BlueReceiptError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(platform) = cli.platform {
        config.platform = platform;
    }
    if let Some(channel) = cli.channel {
        config.rfcomm_channel = Some(channel);
    }
    if let Some(paper) = &cli.paper {
        config.printer = paper.clone();
    }
    Ok(config)
}

fn build_workflow(
    config: &AppConfig,
    platform: Box<dyn BluetoothPlatform>,
    order: Option<&PathBuf>,
) -> Result<PrintWorkflow<Box<dyn BluetoothPlatform>>, BlueReceiptError> {
    let mut workflow = PrintWorkflow::new(platform).with_printer(config.printer.clone());
    if let Some(encoding) = config.encoding {
        workflow = workflow.with_encoding(encoding);
    }
    if let Some(path) = order {
        workflow = workflow.with_order(Order::load(path)?);
    }
    Ok(workflow)
}
