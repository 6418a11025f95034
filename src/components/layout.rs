//! # Layout Components
//!
//! Separators, two-column rows and blank lines.

use super::{Component, DEFAULT_WIDTH};
use crate::ir::Op;
use crate::protocol::text::Alignment;

/// Divider style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DividerStyle {
    /// Dashed line (default): --------
    #[default]
    Dashed,
    /// Equals line: ========
    Equals,
}

/// A horizontal divider line spanning the paper width.
///
/// ```
/// use bluereceipt::components::{ComponentExt, Divider};
///
/// let div = Divider::equals().width(4);
/// assert_eq!(div.compile().lines(), vec!["===="]);
/// ```
pub struct Divider {
    style: DividerStyle,
    width: usize,
}

impl Divider {
    /// Create a divider with a specific style.
    pub fn new(style: DividerStyle) -> Self {
        Self {
            style,
            width: DEFAULT_WIDTH,
        }
    }

    /// Create a dashed divider.
    pub fn dashed() -> Self {
        Self::new(DividerStyle::Dashed)
    }

    /// Create an equals-sign divider.
    pub fn equals() -> Self {
        Self::new(DividerStyle::Equals)
    }

    /// Set the character width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::dashed()
    }
}

impl Component for Divider {
    fn emit(&self, ops: &mut Vec<Op>) {
        let fill = match self.style {
            DividerStyle::Dashed => "-",
            DividerStyle::Equals => "=",
        };
        ops.push(Op::SetAlign(Alignment::Left));
        ops.push(Op::Text(fill.repeat(self.width)));
        ops.push(Op::Newline);
    }
}

/// A two-column row: left text flush left, right text flush right.
///
/// When both sides do not fit, the left side is truncated so that at least
/// one space separates them.
///
/// ```
/// use bluereceipt::components::{Columns, ComponentExt};
///
/// let row = Columns::new("Item", "Price").width(12);
/// assert_eq!(row.compile().lines(), vec!["Item   Price"]);
/// ```
pub struct Columns {
    left: String,
    right: String,
    width: usize,
}

impl Columns {
    /// Create a two-column row.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            width: DEFAULT_WIDTH,
        }
    }

    /// Set the character width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// The padded line this row prints.
    pub fn line(&self) -> String {
        layout_columns(&self.left, &self.right, self.width)
    }
}

impl Component for Columns {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::SetAlign(Alignment::Left));
        ops.push(Op::Text(self.line()));
        ops.push(Op::Newline);
    }
}

/// Lay out `left` and `right` on one line of `width` characters.
pub(crate) fn layout_columns(left: &str, right: &str, width: usize) -> String {
    let right_len = right.chars().count();
    let left_max = width.saturating_sub(right_len + 1);
    let left: String = left.chars().take(left_max).collect();
    let padding = width
        .saturating_sub(left.chars().count() + right_len)
        .max(1);
    format!("{}{}{}", left, " ".repeat(padding), right)
}

/// An empty line (just a newline character).
pub struct BlankLine;

impl BlankLine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BlankLine {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for BlankLine {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Newline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_dashed_divider() {
        let div = Divider::dashed().width(10);
        assert_eq!(div.compile().lines(), vec!["----------"]);
    }

    #[test]
    fn test_divider_default_width() {
        let div = Divider::default();
        assert_eq!(div.compile().lines()[0].len(), DEFAULT_WIDTH);
    }

    #[test]
    fn test_columns_fill_width() {
        let row = Columns::new("Apple x2", "$4.00").width(32);
        let line = row.line();
        assert_eq!(line.len(), 32);
        assert!(line.starts_with("Apple x2 "));
        assert!(line.ends_with(" $4.00"));
    }

    #[test]
    fn test_columns_truncate_left() {
        let line = layout_columns("A very long product name", "$10.00", 16);
        assert_eq!(line, "A very lo $10.00");
        assert_eq!(line.len(), 16);
    }

    #[test]
    fn test_columns_right_wider_than_line() {
        // Never glue the two sides together
        assert_eq!(layout_columns("x", "123456", 4), " 123456");
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(BlankLine::new().compile().to_plain_text(), b"\n");
    }
}
