//! # Intermediate Representation (IR)
//!
//! The IR is a flat "bytecode" between declarative receipt components and
//! the bytes that go over the wire.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────────┐
//! │ Components  │ ──► │     IR      │ ──► │ Codegen              │
//! │(declarative)│     │  (Vec<Op>)  │     │ ESC/POS | plain text │
//! └─────────────┘     └─────────────┘     └──────────────────────┘
//! ```
//!
//! The same program renders either to ESC/POS (for a real printer) or to
//! plain text (for the simulated platform and previews), so both outputs
//! always carry the same lines.
//!
//! ## Example
//!
//! ```
//! use bluereceipt::ir::{Op, Program};
//! use bluereceipt::protocol::text::Alignment;
//!
//! let mut program = Program::new();
//! program.push(Op::Init);
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//! program.push(Op::Cut);
//!
//! let bytes = program.to_escpos();
//! assert!(bytes.starts_with(&[0x1B, 0x40]));
//! assert_eq!(program.to_plain_text(), b"HELLO\n");
//! ```

mod codegen;
mod ops;

pub use ops::*;
