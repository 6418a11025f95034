//! # Error Types
//!
//! This module defines error types used throughout the bluereceipt library.

use thiserror::Error;

/// Main error type for bluereceipt operations
#[derive(Debug, Error)]
pub enum BlueReceiptError {
    /// Transport-level errors (socket creation, connect, write)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The host Bluetooth stack could not be queried
    #[error("Platform error: {0}")]
    Platform(String),

    /// Malformed Bluetooth device address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Configuration or order file problem
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
