//! # ESC/POS Text Styling
//!
//! Commands that change how subsequent text is laid out.
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```
//!
//! Alignment only takes effect at the start of a line.

use super::commands::ESC;

/// Text alignment for subsequent lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC a n   |
/// | Hex     | 1B 61 n   |
///
/// `n` is 0 (left), 1 (center) or 2 (right).
///
/// ```
/// use bluereceipt::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// # Enable Emphasis (ESC E 1)
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E', 1]
}

/// # Disable Emphasis (ESC E 0)
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'E', 0]
}
