//! # Bluetooth Platform Capability
//!
//! Everything the print workflow needs from the host Bluetooth stack,
//! behind one trait:
//!
//! - adapter presence and power state
//! - the list of bonded (paired) devices
//! - an SPP link to one of them
//!
//! ## Implementations
//!
//! | Type | Use |
//! |------|-----|
//! | [`BluezPlatform`] | Linux hosts running `bluetoothd` (D-Bus via `bluer`) |
//! | [`SimulatedPlatform`] | Development hosts without Bluetooth |
//!
//! One implementation is chosen at startup and injected into
//! [`PrintWorkflow`](crate::workflow::PrintWorkflow); call sites never branch
//! on which one is active.

mod bluez;
mod simulated;

pub use bluez::BluezPlatform;
pub use simulated::SimulatedPlatform;

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BlueReceiptError;

/// A bonded Bluetooth device as reported by the host stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedDevice {
    pub name: String,
    /// MAC address, colon-separated hex octets
    pub address: String,
}

impl PairedDevice {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for PairedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

/// State of the host's default Bluetooth adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    /// No adapter on this host
    Missing,
    /// Adapter present but powered off
    Disabled,
    /// Adapter present and powered
    Enabled,
}

/// An open byte stream to a printer. Dropping it closes the link.
pub trait SppLink: Write + Send {}

impl<T: Write + Send> SppLink for T {}

/// Host Bluetooth stack operations used by the print workflow.
pub trait BluetoothPlatform {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// `true` when no real Bluetooth stack is behind this platform.
    fn is_simulated(&self) -> bool {
        false
    }

    /// Query the default adapter.
    fn adapter_state(&self) -> Result<AdapterState, BlueReceiptError>;

    /// Enumerate bonded devices in the order the host reports them.
    fn bonded_devices(&self) -> Result<Vec<PairedDevice>, BlueReceiptError>;

    /// Open a connected link to `service` on `device`.
    fn connect_spp(
        &self,
        device: &PairedDevice,
        service: Uuid,
    ) -> Result<Box<dyn SppLink>, BlueReceiptError>;
}

impl<P: BluetoothPlatform + ?Sized> BluetoothPlatform for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_simulated(&self) -> bool {
        (**self).is_simulated()
    }

    fn adapter_state(&self) -> Result<AdapterState, BlueReceiptError> {
        (**self).adapter_state()
    }

    fn bonded_devices(&self) -> Result<Vec<PairedDevice>, BlueReceiptError> {
        (**self).bonded_devices()
    }

    fn connect_spp(
        &self,
        device: &PairedDevice,
        service: Uuid,
    ) -> Result<Box<dyn SppLink>, BlueReceiptError> {
        (**self).connect_spp(device, service)
    }
}
