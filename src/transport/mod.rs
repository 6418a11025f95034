//! # Printer Transport Layer
//!
//! Communication backends for sending receipt bytes to printers.
//!
//! ## Available Transports
//!
//! - [`bluetooth`]: RFCOMM stream on the Serial Port Profile (Linux, `bluer`)

pub mod bluetooth;

pub use bluetooth::{RfcommSocket, SPP_UUID};
