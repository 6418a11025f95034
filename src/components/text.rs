//! # Text Components
//!
//! Free text, priced line items and totals.

use super::layout::layout_columns;
use super::{Component, DEFAULT_WIDTH};
use crate::ir::Op;
use crate::protocol::text::Alignment;

/// A line of text with optional styling.
///
/// ```
/// use bluereceipt::components::*;
///
/// let plain = Text::new("Hello, World!");
/// let styled = Text::new("IMPORTANT").bold().center();
/// ```
pub struct Text {
    content: String,
    bold: bool,
    centered: bool,
}

impl Text {
    /// Create a new text line.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: false,
            centered: false,
        }
    }

    /// Make text bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Center the line.
    pub fn center(mut self) -> Self {
        self.centered = true;
        self
    }
}

impl Component for Text {
    fn emit(&self, ops: &mut Vec<Op>) {
        if self.centered {
            ops.push(Op::SetAlign(Alignment::Center));
        }
        if self.bold {
            ops.push(Op::SetBold(true));
        }
        ops.push(Op::Text(self.content.clone()));
        ops.push(Op::Newline);
        if self.bold {
            ops.push(Op::SetBold(false));
        }
    }
}

/// An item row: label on the left, formatted price on the right.
///
/// ```
/// use bluereceipt::components::{ComponentExt, LineItem};
///
/// let item = LineItem::new("Apple x2", "$4.00").width(16);
/// assert_eq!(item.compile().lines(), vec!["Apple x2   $4.00"]);
/// ```
pub struct LineItem {
    label: String,
    price: String,
    width: usize,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(label: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            price: price.into(),
            width: DEFAULT_WIDTH,
        }
    }

    /// Set the character width for formatting.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl Component for LineItem {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::SetAlign(Alignment::Left));
        ops.push(Op::Text(layout_columns(&self.label, &self.price, self.width)));
        ops.push(Op::Newline);
    }
}

/// Label printed on the total row.
const TOTAL_LABEL: &str = "TOTAL:";

/// A bold total row spanning the paper width.
///
/// ```
/// use bluereceipt::components::Total;
///
/// let total = Total::new("$19.99");
/// ```
pub struct Total {
    amount: String,
    width: usize,
}

impl Total {
    /// Create a total row for `amount`.
    pub fn new(amount: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            width: DEFAULT_WIDTH,
        }
    }

    /// Set the character width for formatting.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl Component for Total {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::SetAlign(Alignment::Left));
        ops.push(Op::SetBold(true));
        ops.push(Op::Text(layout_columns(TOTAL_LABEL, &self.amount, self.width)));
        ops.push(Op::Newline);
        ops.push(Op::SetBold(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_simple_text() {
        let ir = Text::new("Hello").compile();
        assert_eq!(ir.ops, vec![Op::Init, Op::Text("Hello".into()), Op::Newline]);
    }

    #[test]
    fn test_bold_text() {
        let ir = Text::new("Bold").bold().compile();
        let bold_on = ir.ops.iter().position(|op| *op == Op::SetBold(true)).unwrap();
        let text = ir.ops.iter().position(|op| *op == Op::Text("Bold".into())).unwrap();
        let bold_off = ir.ops.iter().position(|op| *op == Op::SetBold(false)).unwrap();
        assert!(bold_on < text);
        assert!(text < bold_off);
    }

    #[test]
    fn test_centered_text() {
        let ir = Text::new("Centered").center().compile();
        assert!(ir.ops.contains(&Op::SetAlign(Alignment::Center)));
    }

    #[test]
    fn test_line_item() {
        let ir = LineItem::new("Coffee x1", "$4.50").compile();
        let lines = ir.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Coffee x1"));
        assert!(lines[0].ends_with("$4.50"));
        assert_eq!(lines[0].len(), DEFAULT_WIDTH);
    }

    #[test]
    fn test_total() {
        let ir = Total::new("$19.99").width(20).compile();
        assert_eq!(ir.lines(), vec!["TOTAL:        $19.99"]);
        assert!(ir.ops.contains(&Op::SetBold(true)));
    }
}
