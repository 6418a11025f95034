//! # Printer Screen Model
//!
//! Headless state for the single print screen: a device dropdown, a
//! "Print Dummy Receipt" button and a status line. A front end renders
//! [`PrinterApp`] and forwards events to it.
//!
//! ```
//! use bluereceipt::app::PrinterApp;
//! use bluereceipt::permission::GrantedPermission;
//! use bluereceipt::platform::SimulatedPlatform;
//! use bluereceipt::workflow::PrintWorkflow;
//!
//! let mut app = PrinterApp::new(
//!     PrintWorkflow::new(SimulatedPlatform),
//!     GrantedPermission,
//!     Some("Printer"),
//! );
//! app.on_resume();
//! app.select("Dummy Printer");
//! app.on_print();
//! assert_eq!(app.status(), "(TEST MODE) Printed to Dummy Printer");
//! ```

use tracing::debug;

use crate::permission::{
    BLUETOOTH_CONNECT_REQUEST, PermissionGate, PermissionRequest, PermissionState,
};
use crate::platform::{BluetoothPlatform, PairedDevice};
use crate::workflow::{PrintOutcome, PrintWorkflow};

pub const STATUS_READY: &str = "Status: Ready";
pub const STATUS_REQUESTING_PERMISSION: &str = "Requesting Bluetooth permission...";
pub const STATUS_PERMISSION_DENIED: &str = "Bluetooth permission denied.";

/// State behind the print screen.
pub struct PrinterApp<P, G> {
    workflow: PrintWorkflow<P>,
    permissions: G,
    preferred_printer: Option<String>,
    devices: Vec<PairedDevice>,
    auto_selected: Option<String>,
    selected: Option<String>,
    /// Last listing failure, shown until a refresh succeeds
    list_error: Option<String>,
    pending_permission: Option<PermissionRequest>,
    status: String,
}

impl<P: BluetoothPlatform, G: PermissionGate> PrinterApp<P, G> {
    /// Build the screen and populate the dropdown.
    ///
    /// A bonded device named `preferred_printer` is pre-selected.
    pub fn new(workflow: PrintWorkflow<P>, permissions: G, preferred_printer: Option<&str>) -> Self {
        let mut app = Self {
            workflow,
            permissions,
            preferred_printer: preferred_printer.map(str::to_string),
            devices: Vec::new(),
            auto_selected: None,
            selected: None,
            list_error: None,
            pending_permission: None,
            status: STATUS_READY.to_string(),
        };
        app.refresh_devices();
        app
    }

    pub fn workflow(&self) -> &PrintWorkflow<P> {
        &self.workflow
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn devices(&self) -> &[PairedDevice] {
        &self.devices
    }

    /// Names shown in the dropdown.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name.as_str()).collect()
    }

    /// The dropdown is hidden only when the preferred printer was found and
    /// is the sole bonded device.
    pub fn dropdown_visible(&self) -> bool {
        self.devices.len() > 1 || self.auto_selected.is_none()
    }

    /// Printer the next print goes to. An explicit choice always wins; the
    /// auto-selected printer stands in while the dropdown is hidden.
    pub fn selection(&self) -> Option<&str> {
        match &self.selected {
            Some(name) => Some(name),
            None if !self.dropdown_visible() => self.auto_selected.as_deref(),
            None => None,
        }
    }

    /// Choose a printer by name. A blank name clears the selection.
    pub fn select(&mut self, name: &str) {
        let name = name.trim();
        self.selected = (!name.is_empty()).then(|| name.to_string());
    }

    /// Whether a permission request is waiting for an answer.
    pub fn permission_pending(&self) -> bool {
        self.pending_permission.is_some()
    }

    /// The listing failure from the last refresh, if any.
    pub fn list_error(&self) -> Option<&str> {
        self.list_error.as_deref()
    }

    /// Re-query bonded devices. Listing errors go to the status line and
    /// stay there until a refresh succeeds.
    pub fn refresh_devices(&mut self) {
        match self.workflow.list_paired_devices() {
            Ok(devices) => {
                self.devices = devices;
                if self.list_error.take().is_some() {
                    self.status = STATUS_READY.to_string();
                }
            }
            Err(e) => {
                self.devices = Vec::new();
                self.list_error = Some(format!("Error: {}", e));
                self.status = self.idle_status();
            }
        }

        self.auto_selected = self
            .preferred_printer
            .as_ref()
            .filter(|preferred| self.devices.iter().any(|d| &d.name == *preferred))
            .cloned();
        if self.selected.is_none() {
            self.selected = self.auto_selected.clone();
        }
        debug!(
            devices = self.devices.len(),
            auto = ?self.auto_selected,
            "device list refreshed"
        );
    }

    /// The screen came to the foreground.
    pub fn on_resume(&mut self) {
        if self.poll_permission().is_some() {
            return;
        }
        match self.permissions.check() {
            PermissionState::Granted => self.status = self.idle_status(),
            PermissionState::Denied => self.request_permission(),
        }
    }

    /// Pick up the answer to a pending permission request, if it arrived.
    pub fn poll_permission(&mut self) -> Option<PermissionState> {
        let state = self.pending_permission.as_mut()?.try_result()?;
        self.finish_permission(state);
        Some(state)
    }

    /// Block up to `timeout` for a pending permission answer.
    pub fn wait_permission(&mut self, timeout: std::time::Duration) -> Option<PermissionState> {
        let state = self.pending_permission.as_mut()?.wait(timeout)?;
        self.finish_permission(state);
        Some(state)
    }

    /// The print button was pressed.
    pub fn on_print(&mut self) -> PrintOutcome {
        let outcome = match self.selection().map(str::to_string) {
            None => PrintOutcome::NoDeviceSelected,
            Some(name) => match self.permissions.check() {
                PermissionState::Granted => self.workflow.print_to_device(&name),
                PermissionState::Denied => {
                    self.request_permission();
                    PrintOutcome::PermissionRequired
                }
            },
        };
        self.status = outcome.to_string();
        outcome
    }

    fn request_permission(&mut self) {
        if self.pending_permission.is_none() {
            self.pending_permission = Some(self.permissions.request(BLUETOOTH_CONNECT_REQUEST));
        }
        self.status = STATUS_REQUESTING_PERMISSION.to_string();
    }

    fn finish_permission(&mut self, state: PermissionState) {
        self.pending_permission = None;
        self.status = match state {
            PermissionState::Granted => self.idle_status(),
            PermissionState::Denied => STATUS_PERMISSION_DENIED.to_string(),
        };
    }

    /// Status shown when nothing is in flight.
    fn idle_status(&self) -> String {
        self.list_error
            .clone()
            .unwrap_or_else(|| STATUS_READY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::GrantedPermission;
    use crate::platform::SimulatedPlatform;

    fn simulated(preferred: Option<&str>) -> PrinterApp<SimulatedPlatform, GrantedPermission> {
        PrinterApp::new(PrintWorkflow::new(SimulatedPlatform), GrantedPermission, preferred)
    }

    #[test]
    fn test_initial_state() {
        let app = simulated(Some("Printer"));
        assert_eq!(app.status(), STATUS_READY);
        assert_eq!(app.device_names(), vec!["Dummy Printer"]);
        assert!(app.dropdown_visible());
        assert_eq!(app.selection(), None);
    }

    #[test]
    fn test_preferred_printer_hides_dropdown() {
        let app = simulated(Some("Dummy Printer"));
        assert!(!app.dropdown_visible());
        assert_eq!(app.selection(), Some("Dummy Printer"));
    }

    #[test]
    fn test_print_without_selection() {
        let mut app = simulated(None);
        assert_eq!(app.on_print(), PrintOutcome::NoDeviceSelected);
        assert_eq!(app.status(), "Please select a printer first.");
    }

    #[test]
    fn test_blank_selection_clears() {
        let mut app = simulated(None);
        app.select("Dummy Printer");
        app.select("   ");
        assert_eq!(app.selection(), None);
    }

    #[test]
    fn test_explicit_choice_beats_auto_selection() {
        let mut app = simulated(Some("Dummy Printer"));
        assert!(!app.dropdown_visible());
        app.select("Kitchen");
        assert_eq!(app.selection(), Some("Kitchen"));
        assert_eq!(
            app.on_print(),
            PrintOutcome::TestMode {
                device: "Kitchen".to_string()
            }
        );
    }

    #[test]
    fn test_blank_choice_restores_auto_selection() {
        let mut app = simulated(Some("Dummy Printer"));
        app.select("Kitchen");
        app.select("");
        assert_eq!(app.selection(), Some("Dummy Printer"));
    }

    #[test]
    fn test_resume_with_permission() {
        let mut app = simulated(None);
        app.on_resume();
        assert_eq!(app.status(), STATUS_READY);
        assert!(!app.permission_pending());
    }
}
