//! # Application Configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. A JSON file (`--config`)
//! 3. Command-line flags and environment variables
//!
//! ```json
//! {
//!   "platform": "auto",
//!   "preferred_printer": "Printer",
//!   "printer": { "name": "58mm", "paper_width_mm": 58, "columns": 32 },
//!   "rfcomm_channel": null,
//!   "chunk_size": 4096,
//!   "chunk_delay_ms": 2
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::BlueReceiptError;
use crate::permission::{GrantedPermission, PermissionGate, SocketPermission};
use crate::platform::{BluetoothPlatform, BluezPlatform, SimulatedPlatform};
use crate::printer::{PrinterConfig, ReceiptEncoding};
use crate::transport::bluetooth::{CHUNK_DELAY_MS, CHUNK_SIZE};

/// Which Bluetooth platform to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PlatformMode {
    /// BlueZ when `bluetoothd` answers, simulated otherwise
    #[default]
    Auto,
    /// Always use BlueZ
    Bluez,
    /// Never touch Bluetooth
    Simulated,
}

/// All runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub platform: PlatformMode,
    /// Pre-selected when a bonded device carries this name
    pub preferred_printer: Option<String>,
    pub printer: PrinterConfig,
    /// Defaults to plain text on the simulated platform, ESC/POS otherwise
    pub encoding: Option<ReceiptEncoding>,
    /// RFCOMM channel of the printer's SPP service; 1 when unset
    pub rfcomm_channel: Option<u8>,
    pub chunk_size: usize,
    pub chunk_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: PlatformMode::Auto,
            preferred_printer: Some("Printer".to_string()),
            printer: PrinterConfig::default(),
            encoding: None,
            rfcomm_channel: None,
            chunk_size: CHUNK_SIZE,
            chunk_delay_ms: CHUNK_DELAY_MS,
        }
    }
}

impl AppConfig {
    /// Parse a JSON config. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, BlueReceiptError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BlueReceiptError::Config(format!("Invalid config: {}", e)))?;
        if config.chunk_size == 0 {
            return Err(BlueReceiptError::Config(
                "chunk_size must be positive".to_string(),
            ));
        }
        if config.printer.columns == 0 {
            return Err(BlueReceiptError::Config(
                "printer.columns must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BlueReceiptError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            BlueReceiptError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Instantiate the platform. Called once at startup.
    ///
    /// `auto` falls back to the simulated platform when `bluetoothd` cannot
    /// be reached; `bluez` reports that as an error.
    pub fn build_platform(&self) -> Result<Box<dyn BluetoothPlatform>, BlueReceiptError> {
        match self.platform {
            PlatformMode::Simulated => Ok(Self::simulated()),
            PlatformMode::Bluez => Ok(Box::new(self.open_bluez()?)),
            PlatformMode::Auto => match self.open_bluez() {
                Ok(platform) => Ok(Box::new(platform)),
                Err(e) => {
                    warn!(error = %e, "BlueZ unavailable, falling back to simulated platform");
                    Ok(Self::simulated())
                }
            },
        }
    }

    fn open_bluez(&self) -> Result<BluezPlatform, BlueReceiptError> {
        let platform = BluezPlatform::open()?
            .with_channel(self.rfcomm_channel)
            .with_chunking(self.chunk_size, Duration::from_millis(self.chunk_delay_ms));
        info!("using BlueZ Bluetooth platform");
        Ok(platform)
    }

    fn simulated() -> Box<dyn BluetoothPlatform> {
        info!("using simulated Bluetooth platform");
        Box::new(SimulatedPlatform)
    }

    /// The permission gate matching `platform`.
    pub fn build_permissions(&self, platform: &dyn BluetoothPlatform) -> Box<dyn PermissionGate> {
        if platform.is_simulated() {
            Box::new(GrantedPermission)
        } else {
            Box::new(SocketPermission)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.platform, PlatformMode::Auto);
        assert_eq!(config.preferred_printer.as_deref(), Some("Printer"));
        assert_eq!(config.printer.columns, 32);
        assert_eq!(config.chunk_size, 4096);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"platform":"simulated","rfcomm_channel":2}"#).unwrap();
        assert_eq!(config.platform, PlatformMode::Simulated);
        assert_eq!(config.rfcomm_channel, Some(2));
        assert_eq!(config.printer, PrinterConfig::default());
    }

    #[test]
    fn test_encoding_override() {
        let config = AppConfig::from_json(r#"{"encoding":"esc_pos"}"#).unwrap();
        assert_eq!(config.encoding, Some(ReceiptEncoding::EscPos));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            AppConfig::from_json("{"),
            Err(BlueReceiptError::Config(_))
        ));
        assert!(AppConfig::from_json(r#"{"chunk_size":0}"#).is_err());
        assert!(AppConfig::from_json(r#"{"platform":"android"}"#).is_err());
    }

    #[test]
    fn test_zero_columns_rejected() {
        let json = r#"{"printer":{"name":"x","paper_width_mm":58,"columns":0}}"#;
        match AppConfig::from_json(json) {
            Err(BlueReceiptError::Config(message)) => {
                assert_eq!(message, "printer.columns must be positive");
            }
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn test_simulated_builds_granted_gate() {
        let config = AppConfig {
            platform: PlatformMode::Simulated,
            ..Default::default()
        };
        let platform = config.build_platform().unwrap();
        assert!(platform.is_simulated());
        let gate = config.build_permissions(platform.as_ref());
        assert_eq!(gate.check(), crate::permission::PermissionState::Granted);
    }
}
