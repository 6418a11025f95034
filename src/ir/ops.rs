//! # IR Opcodes
//!
//! Each opcode is a single atomic printer operation. Style changes are
//! individual ops so components can toggle them around their own text.

use crate::protocol::text::Alignment;

/// IR opcodes - the "bytecode" for receipt printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets to default state.
    Init,

    /// Feed the last line past the blade, then cut.
    Cut,

    // ========== Style Changes ==========
    /// Set text alignment.
    SetAlign(Alignment),

    /// Enable/disable bold.
    SetBold(bool),

    // ========== Content ==========
    /// Raw text (no trailing newline).
    Text(String),

    /// Line feed (newline).
    Newline,
}

/// A compiled IR program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The text lines this program prints, in order.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.to_plain_text())
            .split_terminator('\n')
            .map(str::to_string)
            .collect()
    }
}
