//! # Printer Configuration
//!
//! Paper geometry for the Bluetooth receipt printers this crate targets,
//! and the encoding used to turn a receipt into bytes.
//!
//! ## Presets
//!
//! | Preset | Paper | Columns (Font A) |
//! |--------|-------|------------------|
//! | 58mm   | 58mm  | 32               |
//! | 80mm   | 80mm  | 48               |
//!
//! ```
//! use bluereceipt::printer::PrinterConfig;
//!
//! let config = PrinterConfig::MM58;
//! assert_eq!(config.columns, 32);
//! ```

use serde::{Deserialize, Serialize};

/// # Printer Configuration
///
/// Describes the text grid of a thermal printer. Receipt layout pads and
/// truncates against `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Human-readable preset name
    pub name: String,

    /// Paper width in millimeters
    pub paper_width_mm: u8,

    /// Characters per line in the default font
    pub columns: usize,
}

impl PrinterConfig {
    /// 58mm paper, 32 columns. The common size for handheld Bluetooth printers.
    pub const MM58: PrinterConfigPreset = PrinterConfigPreset {
        name: "58mm",
        paper_width_mm: 58,
        columns: 32,
    };

    /// 80mm paper, 48 columns.
    pub const MM80: PrinterConfigPreset = PrinterConfigPreset {
        name: "80mm",
        paper_width_mm: 80,
        columns: 48,
    };

    /// Parse a preset name (`"58mm"`, `"80mm"`) or a bare column count.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "58" | "58mm" => Ok(Self::MM58.into()),
            "80" | "80mm" => Ok(Self::MM80.into()),
            other => {
                let columns: usize = other
                    .parse()
                    .map_err(|_| format!("Unknown printer '{}'. Use '58mm', '80mm' or a column count", s))?;
                if columns == 0 {
                    return Err("Column count must be positive".to_string());
                }
                Ok(Self {
                    name: format!("{} columns", columns),
                    paper_width_mm: 0,
                    columns,
                })
            }
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::MM58.into()
    }
}

/// Compile-time preset; converts into an owned [`PrinterConfig`].
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfigPreset {
    pub name: &'static str,
    pub paper_width_mm: u8,
    pub columns: usize,
}

impl From<PrinterConfigPreset> for PrinterConfig {
    fn from(preset: PrinterConfigPreset) -> Self {
        Self {
            name: preset.name.to_string(),
            paper_width_mm: preset.paper_width_mm,
            columns: preset.columns,
        }
    }
}

/// How a receipt program is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptEncoding {
    /// ESC/POS command stream with a paper cut
    EscPos,
    /// Plain text without control bytes, for previews and the simulated platform
    PlainText,
}

// ============================================================================
// TESTS
// ============================================================================
