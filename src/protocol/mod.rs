//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the ESC/POS command set spoken by most
//! Bluetooth receipt printers (58mm and 80mm "BT-xxx" style devices).
//!
//! ## Module Structure
//!
//! - [`commands`]: Printer control (init, cut)
//! - [`text`]: Text styling (alignment, emphasis)
//!
//! ## Usage Example
//!
//! ```
//! use bluereceipt::protocol::{commands, text};
//! use bluereceipt::protocol::text::Alignment;
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(Alignment::Center));
//! data.extend(text::bold_on());
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold_off());
//! data.extend(commands::feed_and_cut(3));
//! ```

pub mod commands;
pub mod text;
