//! Stand-in platform for hosts without Bluetooth.

use uuid::Uuid;

use super::{AdapterState, BluetoothPlatform, PairedDevice, SppLink};
use crate::error::BlueReceiptError;

/// Name of the single placeholder device.
pub const PLACEHOLDER_NAME: &str = "Dummy Printer";

/// Address of the single placeholder device.
pub const PLACEHOLDER_ADDRESS: &str = "00:11:22:33:44:55";

/// Reports one placeholder printer so the print flow stays usable on a
/// development machine. Nothing is ever transmitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedPlatform;

impl SimulatedPlatform {
    pub fn new() -> Self {
        Self
    }

    pub fn placeholder() -> PairedDevice {
        PairedDevice::new(PLACEHOLDER_NAME, PLACEHOLDER_ADDRESS)
    }
}

impl BluetoothPlatform for SimulatedPlatform {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn adapter_state(&self) -> Result<AdapterState, BlueReceiptError> {
        Ok(AdapterState::Enabled)
    }

    fn bonded_devices(&self) -> Result<Vec<PairedDevice>, BlueReceiptError> {
        Ok(vec![Self::placeholder()])
    }

    fn connect_spp(
        &self,
        device: &PairedDevice,
        _service: Uuid,
    ) -> Result<Box<dyn SppLink>, BlueReceiptError> {
        Err(BlueReceiptError::Transport(format!(
            "no Bluetooth transport on the simulated platform (device {})",
            device.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::SPP_UUID;

    #[test]
    fn test_single_placeholder() {
        let devices = SimulatedPlatform.bonded_devices().unwrap();
        assert_eq!(devices, vec![PairedDevice::new("Dummy Printer", "00:11:22:33:44:55")]);
    }

    #[test]
    fn test_never_connects() {
        let result = SimulatedPlatform.connect_spp(&SimulatedPlatform::placeholder(), SPP_UUID);
        assert!(matches!(result, Err(BlueReceiptError::Transport(_))));
    }
}
