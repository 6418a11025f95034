//! # Print Workflow
//!
//! The device-select-and-print pipeline:
//!
//! ```text
//! list_paired_devices ──► user picks a name ──► print_to_device
//!                                                 │
//!                          adapter? ─ bonded? ─ receipt ─ SPP link ─ write
//! ```
//!
//! Every call to [`PrintWorkflow::print_to_device`] re-resolves the device
//! and opens a fresh link. Nothing is retried, and no failure escapes: each
//! path ends in a [`PrintOutcome`].

use std::fmt;
use std::io::Write;

use tracing::{info, instrument, warn};

use crate::error::BlueReceiptError;
use crate::platform::{AdapterState, BluetoothPlatform, PairedDevice};
use crate::printer::{PrinterConfig, ReceiptEncoding};
use crate::receipt::{self, Order, Receipt};
use crate::transport::SPP_UUID;

/// Result of a print request.
///
/// `Display` gives the status line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// Receipt written and the link closed.
    Printed { device: String, bytes: usize },
    /// Simulated platform; nothing was sent.
    TestMode { device: String },
    /// The user pressed print without choosing a printer.
    NoDeviceSelected,
    /// Bluetooth access has not been granted yet.
    PermissionRequired,
    /// The host has no Bluetooth adapter.
    Unsupported,
    /// The adapter is powered off.
    Disabled,
    /// No bonded device carries this name.
    NotFound { device: String },
    /// Anything that failed while talking to the stack or the printer.
    Transport { message: String },
}

impl PrintOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Printed { .. } | Self::TestMode { .. })
    }
}

impl fmt::Display for PrintOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Printed { .. } => write!(f, "Receipt printed successfully!"),
            Self::TestMode { device } => write!(f, "(TEST MODE) Printed to {}", device),
            Self::NoDeviceSelected => write!(f, "Please select a printer first."),
            Self::PermissionRequired => write!(f, "Bluetooth permission is required to print."),
            Self::Unsupported => write!(f, "Bluetooth not supported."),
            Self::Disabled => write!(f, "Bluetooth is disabled. Please enable it."),
            Self::NotFound { device } => {
                write!(f, "Device '{}' not found. Please pair it first.", device)
            }
            Self::Transport { message } => write!(f, "Error: {}", message),
        }
    }
}

impl From<BlueReceiptError> for PrintOutcome {
    fn from(e: BlueReceiptError) -> Self {
        let message = match e {
            BlueReceiptError::Transport(message) | BlueReceiptError::Platform(message) => message,
            other => other.to_string(),
        };
        Self::Transport { message }
    }
}

/// Device listing, receipt formatting and dispatch over one platform.
pub struct PrintWorkflow<P> {
    platform: P,
    order: Order,
    printer: PrinterConfig,
    encoding: ReceiptEncoding,
}

impl<P: BluetoothPlatform> PrintWorkflow<P> {
    /// Create a workflow printing the demo order.
    ///
    /// The simulated platform formats plain text; real platforms use ESC/POS.
    pub fn new(platform: P) -> Self {
        let encoding = if platform.is_simulated() {
            ReceiptEncoding::PlainText
        } else {
            ReceiptEncoding::EscPos
        };
        Self {
            platform,
            order: Order::speed_x(),
            printer: PrinterConfig::default(),
            encoding,
        }
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_printer(mut self, printer: PrinterConfig) -> Self {
        self.printer = printer;
        self
    }

    pub fn with_encoding(mut self, encoding: ReceiptEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn encoding(&self) -> ReceiptEncoding {
        self.encoding
    }

    /// Bonded devices, or an empty list when the adapter is missing or off.
    pub fn list_paired_devices(&self) -> Result<Vec<PairedDevice>, BlueReceiptError> {
        match self.platform.adapter_state()? {
            AdapterState::Missing | AdapterState::Disabled => Ok(Vec::new()),
            AdapterState::Enabled => self.platform.bonded_devices(),
        }
    }

    /// Format the configured order.
    pub fn generate_receipt(&self) -> Receipt {
        receipt::generate_receipt(&self.order, &self.printer, self.encoding)
    }

    /// Print the receipt to the bonded device named `device_name`.
    #[instrument(skip(self), fields(platform = self.platform.name()))]
    pub fn print_to_device(&self, device_name: &str) -> PrintOutcome {
        if self.platform.is_simulated() {
            info!("test mode, nothing sent");
            return PrintOutcome::TestMode {
                device: device_name.to_string(),
            };
        }

        let outcome = self.dispatch(device_name).unwrap_or_else(PrintOutcome::from);
        match &outcome {
            PrintOutcome::Printed { bytes, .. } => info!(bytes, "receipt printed"),
            other => warn!(outcome = %other, "print failed"),
        }
        outcome
    }

    fn dispatch(&self, device_name: &str) -> Result<PrintOutcome, BlueReceiptError> {
        match self.platform.adapter_state()? {
            AdapterState::Missing => return Ok(PrintOutcome::Unsupported),
            AdapterState::Disabled => return Ok(PrintOutcome::Disabled),
            AdapterState::Enabled => {}
        }

        let Some(target) = self
            .platform
            .bonded_devices()?
            .into_iter()
            .find(|d| d.name == device_name)
        else {
            return Ok(PrintOutcome::NotFound {
                device: device_name.to_string(),
            });
        };

        let receipt = self.generate_receipt();
        self.transmit(&target, &receipt)?;

        Ok(PrintOutcome::Printed {
            device: target.name,
            bytes: receipt.len(),
        })
    }

    /// Connect, write and flush. The link is dropped (closed) on return,
    /// whether or not the write succeeded.
    fn transmit(&self, target: &PairedDevice, receipt: &Receipt) -> Result<(), BlueReceiptError> {
        let mut link = self.platform.connect_spp(target, SPP_UUID)?;
        link.write_all(receipt.as_bytes())
            .map_err(|e| BlueReceiptError::Transport(format!("Write failed: {}", e)))?;
        link.flush()
            .map_err(|e| BlueReceiptError::Transport(format!("Flush failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimulatedPlatform;

    #[test]
    fn test_status_text() {
        let cases = [
            (
                PrintOutcome::Printed { device: "P".into(), bytes: 3 },
                "Receipt printed successfully!",
            ),
            (
                PrintOutcome::TestMode { device: "P".into() },
                "(TEST MODE) Printed to P",
            ),
            (PrintOutcome::NoDeviceSelected, "Please select a printer first."),
            (PrintOutcome::Unsupported, "Bluetooth not supported."),
            (PrintOutcome::Disabled, "Bluetooth is disabled. Please enable it."),
            (
                PrintOutcome::NotFound { device: "X".into() },
                "Device 'X' not found. Please pair it first.",
            ),
            (
                PrintOutcome::Transport { message: "boom".into() },
                "Error: boom",
            ),
        ];
        for (outcome, text) in cases {
            assert_eq!(outcome.to_string(), text);
        }
    }

    #[test]
    fn test_error_maps_to_transport() {
        let outcome = PrintOutcome::from(BlueReceiptError::Transport("link lost".into()));
        assert_eq!(outcome, PrintOutcome::Transport { message: "link lost".into() });

        let outcome = PrintOutcome::from(BlueReceiptError::InvalidAddress("zz".into()));
        assert_eq!(outcome.to_string(), "Error: Invalid address: zz");
    }

    #[test]
    fn test_simulated_defaults() {
        let workflow = PrintWorkflow::new(SimulatedPlatform);
        assert_eq!(workflow.encoding(), ReceiptEncoding::PlainText);
        assert_eq!(workflow.list_paired_devices().unwrap().len(), 1);
        let outcome = workflow.print_to_device("Anything");
        assert_eq!(outcome, PrintOutcome::TestMode { device: "Anything".into() });
        assert!(outcome.is_success());
    }
}
