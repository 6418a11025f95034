//! # Printer Module
//!
//! Printer-specific configuration.
//!
//! ## Modules
//!
//! - [`config`]: Paper geometry and output encoding

pub mod config;

pub use config::{PrinterConfig, ReceiptEncoding};
