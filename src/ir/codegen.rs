//! # Code Generation
//!
//! Converts IR programs to ESC/POS bytes or to plain text.

use super::ops::{Op, Program};
use crate::protocol::{commands, text};

/// Lines fed past the print head before the cutter fires.
const CUT_FEED_LINES: u8 = 3;

/// Replacement for characters outside the printer's ASCII range.
const REPLACEMENT: u8 = b'?';

impl Program {
    /// Compile the IR program to ESC/POS bytes.
    pub fn to_escpos(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => out.extend(commands::init()),
                Op::Cut => out.extend(commands::feed_and_cut(CUT_FEED_LINES)),

                // ===== Style Changes =====
                Op::SetAlign(align) => out.extend(text::align(*align)),
                Op::SetBold(enabled) => {
                    if *enabled {
                        out.extend(text::bold_on());
                    } else {
                        out.extend(text::bold_off());
                    }
                }

                // ===== Content =====
                Op::Text(s) => encode_text(s, &mut out),
                Op::Newline => out.push(commands::LF),
            }
        }

        out
    }

    /// Render the IR program as plain text.
    ///
    /// Only text and line breaks survive; styling, init and the cut are
    /// dropped.
    pub fn to_plain_text(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                Op::Text(s) => encode_text(s, &mut out),
                Op::Newline => out.push(b'\n'),
                Op::Init | Op::Cut | Op::SetAlign(_) | Op::SetBold(_) => {}
            }
        }

        out
    }
}

/// Append text as single-byte printer characters.
fn encode_text(s: &str, out: &mut Vec<u8>) {
    out.extend(s.chars().map(|c| {
        if c.is_ascii() && !c.is_ascii_control() {
            c as u8
        } else {
            REPLACEMENT
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::Alignment;

    fn program(ops: Vec<Op>) -> Program {
        Program { ops }
    }

    #[test]
    fn test_empty_program() {
        let program = Program::new();
        assert!(program.to_escpos().is_empty());
        assert!(program.to_plain_text().is_empty());
    }

    #[test]
    fn test_init_only() {
        let program = program(vec![Op::Init]);
        assert_eq!(program.to_escpos(), vec![0x1B, 0x40]);
        assert!(program.to_plain_text().is_empty());
    }

    #[test]
    fn test_simple_text() {
        let mut program = program(vec![Op::Init]);
        program.push(Op::Text("Hello".into()));
        program.push(Op::Newline);

        let bytes = program.to_escpos();
        assert!(bytes.starts_with(&[0x1B, 0x40]));
        assert!(bytes.ends_with(b"Hello\n"));
    }

    #[test]
    fn test_styled_text() {
        let program = program(vec![
            Op::SetAlign(Alignment::Center),
            Op::SetBold(true),
            Op::Text("HI".into()),
            Op::Newline,
            Op::SetBold(false),
        ]);

        assert_eq!(
            program.to_escpos(),
            vec![0x1B, 0x61, 0x01, 0x1B, 0x45, 0x01, b'H', b'I', 0x0A, 0x1B, 0x45, 0x00]
        );
        assert_eq!(program.to_plain_text(), b"HI\n");
    }

    #[test]
    fn test_cut() {
        let program = program(vec![Op::Text("x".into()), Op::Newline, Op::Cut]);

        assert_eq!(
            program.to_escpos(),
            vec![b'x', 0x0A, 0x1D, 0x56, 0x41, CUT_FEED_LINES]
        );
        assert_eq!(program.to_plain_text(), b"x\n");
    }

    #[test]
    fn test_non_ascii_replaced() {
        let program = program(vec![Op::Text("café\t".into())]);
        assert_eq!(program.to_escpos(), b"caf??");
        assert_eq!(program.to_plain_text(), b"caf??");
    }

    #[test]
    fn test_lines() {
        let program = program(vec![
            Op::Text("a".into()),
            Op::Newline,
            Op::Newline,
            Op::Text("b".into()),
            Op::Newline,
        ]);
        assert_eq!(program.lines(), vec!["a", "", "b"]);
    }
}
