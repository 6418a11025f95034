//! # Receipt Component
//!
//! The root container: children top to bottom, then an optional cut.

use super::Component;
use crate::ir::Op;

/// Root container for a printed receipt.
///
/// ```
/// use bluereceipt::components::*;
/// use bluereceipt::printer::ReceiptEncoding;
///
/// let receipt = Receipt::new()
///     .child(Text::new("STORE NAME").center())
///     .child(Divider::dashed())
///     .cut();
///
/// let text = receipt.build(ReceiptEncoding::PlainText);
/// assert!(text.starts_with(b"STORE NAME\n"));
/// ```
#[derive(Default)]
pub struct Receipt {
    children: Vec<Box<dyn Component>>,
    cut: bool,
}

impl Receipt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one component.
    pub fn child<C: Component + 'static>(mut self, component: C) -> Self {
        self.children.push(Box::new(component));
        self
    }

    /// Append components in iteration order.
    pub fn children<I, C>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Component + 'static,
    {
        self.children.extend(
            components
                .into_iter()
                .map(|c| Box::new(c) as Box<dyn Component>),
        );
        self
    }

    /// Feed and cut the paper after the last child.
    pub fn cut(mut self) -> Self {
        self.cut = true;
        self
    }
}

impl Component for Receipt {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.children.iter().for_each(|child| child.emit(ops));
        if self.cut {
            ops.push(Op::Cut);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentExt, Text};

    #[test]
    fn test_empty_receipt_is_init_only() {
        assert_eq!(Receipt::new().compile().ops, vec![Op::Init]);
    }

    #[test]
    fn test_cut_comes_last() {
        let ir = Receipt::new()
            .children(vec![Text::new("Hello"), Text::new("World")])
            .cut()
            .compile();

        assert_eq!(ir.lines(), vec!["Hello", "World"]);
        assert_eq!(ir.ops.last(), Some(&Op::Cut));
    }

    #[test]
    fn test_no_cut_unless_asked() {
        let ir = Receipt::new().child(Text::new("x")).compile();
        assert!(!ir.ops.contains(&Op::Cut));
    }
}
