//! # ESC/POS Printer Control Commands
//!
//! Escape sequences for initialising the printer and operating the
//! auto-cutter.
//!
//! ## Escape Sequence Structure
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - With parameters: `GS V m n`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for cutter commands.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// Cutter mode byte for "feed, then full cut" (`GS V 65 n`)
const CUT_FEED_FULL: u8 = 65;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets text modes to power-on defaults.
/// Sent once at the start of every receipt.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use bluereceipt::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Feed, Then Cut (GS V 65 n)
///
/// Feeds `lines` lines past the print head so the last printed line clears
/// the blade, then makes a full cut. Printers without a cutter just feed.
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS V A n   |
/// | Hex     | 1D 56 41 n |
///
/// ```
/// use bluereceipt::protocol::commands;
///
/// assert_eq!(commands::feed_and_cut(3), vec![0x1D, 0x56, 0x41, 0x03]);
/// ```
#[inline]
pub fn feed_and_cut(lines: u8) -> Vec<u8> {
    vec![GS, b'V', CUT_FEED_FULL, lines]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_feed_and_cut() {
        assert_eq!(feed_and_cut(3), vec![0x1D, 0x56, 0x41, 0x03]);
        assert_eq!(feed_and_cut(0), vec![0x1D, 0x56, 0x41, 0x00]);
    }
}
