//! # bluereceipt - Bluetooth Receipt Printing
//!
//! Prints receipts on paired Bluetooth thermal printers over RFCOMM using
//! the Serial Port Profile (SPP). It provides:
//!
//! - **Device listing**: bonded devices from the host Bluetooth stack
//! - **Receipt formatting**: a fixed layout rendered to ESC/POS or plain text
//! - **Dispatch**: resolve a printer by name, connect, write, close
//!
//! ## Quick Start
//!
//! ```no_run
//! use bluereceipt::{PrintWorkflow, platform::BluezPlatform};
//!
//! let workflow = PrintWorkflow::new(BluezPlatform::open()?);
//!
//! for device in workflow.list_paired_devices()? {
//!     println!("{}", device);
//! }
//!
//! let outcome = workflow.print_to_device("BT-600M");
//! println!("{}", outcome);
//!
//! # Ok::<(), bluereceipt::BlueReceiptError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`workflow`] | List devices, format and dispatch receipts |
//! | [`receipt`] | Orders and the fixed receipt layout |
//! | [`components`] | Declarative receipt building blocks |
//! | [`ir`] | Op program between components and bytes |
//! | [`protocol`] | ESC/POS command builders |
//! | [`platform`] | Host Bluetooth stack capability |
//! | [`transport`] | RFCOMM streams (`bluer`) |
//! | [`permission`] | Bluetooth permission requests |
//! | [`app`] | Headless print screen state |
//! | [`config`] | Runtime settings |
//! | [`error`] | Error types |

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod ir;
pub mod permission;
pub mod platform;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod transport;
pub mod workflow;

// Re-exports for convenience
pub use error::BlueReceiptError;
pub use platform::PairedDevice;
pub use printer::PrinterConfig;
pub use receipt::{Order, Receipt};
pub use workflow::{PrintOutcome, PrintWorkflow};
