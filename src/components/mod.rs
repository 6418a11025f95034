//! # Declarative Components
//!
//! Building blocks for receipts. Instead of emitting escape sequences by
//! hand, describe *what* should be printed:
//!
//! ```
//! use bluereceipt::components::*;
//! use bluereceipt::printer::ReceiptEncoding;
//!
//! let receipt = Receipt::new()
//!     .child(Text::new("CORNER SHOP").center().bold())
//!     .child(Divider::dashed().width(32))
//!     .child(LineItem::new("Espresso x1", "$4.50").width(32))
//!     .child(Total::new("$4.50").width(32))
//!     .cut();
//!
//! // Compile to IR (inspectable)
//! let ir = receipt.compile();
//! assert!(!ir.is_empty());
//!
//! // Generate bytes
//! let bytes = receipt.build(ReceiptEncoding::EscPos);
//! assert!(bytes.starts_with(&[0x1B, 0x40]));
//! ```
//!
//! All components implement [`Component`], which appends IR ops.

mod layout;
mod receipt;
mod text;

pub use layout::*;
pub use receipt::*;
pub use text::*;

use crate::ir::{Op, Program};
use crate::printer::ReceiptEncoding;

/// Default line width in characters (58mm paper, Font A).
pub const DEFAULT_WIDTH: usize = 32;

/// Trait for declarative components.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

/// Extension trait for compiling components.
pub trait ComponentExt: Component {
    /// Compile this component to an IR program.
    ///
    /// The program starts with an Init op, followed by the component's ops.
    fn compile(&self) -> Program {
        let mut ops = vec![Op::Init];
        self.emit(&mut ops);
        Program { ops }
    }

    /// Compile and generate bytes in the given encoding.
    fn build(&self, encoding: ReceiptEncoding) -> Vec<u8> {
        let program = self.compile();
        match encoding {
            ReceiptEncoding::EscPos => program.to_escpos(),
            ReceiptEncoding::PlainText => program.to_plain_text(),
        }
    }
}

impl<T: Component> ComponentExt for T {}

impl Component for Box<dyn Component> {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.as_ref().emit(ops);
    }
}

impl<T: Component + ?Sized> Component for &T {
    fn emit(&self, ops: &mut Vec<Op>) {
        (*self).emit(ops);
    }
}
