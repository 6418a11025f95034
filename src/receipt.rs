//! # Receipt Formatter
//!
//! Turns an [`Order`] into the bytes sent to the printer.
//!
//! The layout is fixed; only the order content varies. On 58 mm paper the
//! ESC/POS rendering prints as:
//!
//! ```text
//!          SPEED X STORE
//! --------------------------------
//! Item                       Price
//! --------------------------------
//! Apple x2                   $4.00
//! Banana x5                  $7.50
//! Orange x3                  $6.00
//! --------------------------------
//! TOTAL:                    $17.50
//! ================================
//!      Thank you! Come again
//!
//!
//! ```
//!
//! The printer centers the header and footer from `ESC a 1`. The plain-text
//! encoding carries no alignment, so there every line starts at column 0.
//!
//! Formatting is a pure function of its inputs: the same order, printer and
//! encoding always produce the same bytes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::{
    BlankLine, Columns, ComponentExt, Divider, LineItem, Receipt as Layout, Text, Total,
};
use crate::error::BlueReceiptError;
use crate::printer::{PrinterConfig, ReceiptEncoding};

// ============================================================================
// ORDER MODEL
// ============================================================================

/// One priced line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Price of a single unit, in cents
    pub unit_price_cents: u64,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price_cents: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price_cents,
        }
    }

    /// Quantity times unit price, in cents.
    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents.saturating_mul(u64::from(self.quantity))
    }

    /// Printed label, e.g. `"Apple x2"`.
    pub fn label(&self) -> String {
        format!("{} x{}", self.name, self.quantity)
    }
}

/// An itemized order to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub store_name: String,
    #[serde(default = "default_footer")]
    pub footer: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub items: Vec<OrderItem>,
}

fn default_footer() -> String {
    "Thank you! Come again".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

impl Order {
    /// The built-in demo order printed by the "Print Dummy Receipt" action.
    pub fn speed_x() -> Self {
        Self {
            store_name: "SPEED X STORE".to_string(),
            footer: default_footer(),
            currency: default_currency(),
            items: vec![
                OrderItem::new("Apple", 2, 200),
                OrderItem::new("Banana", 5, 150),
                OrderItem::new("Orange", 3, 200),
            ],
        }
    }

    /// Sum of all line totals, in cents.
    pub fn total_cents(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.line_total_cents()))
    }

    /// Format an amount in cents with this order's currency symbol.
    pub fn format_money(&self, cents: u64) -> String {
        format!("{}{}.{:02}", self.currency, cents / 100, cents % 100)
    }

    /// Parse an order from JSON.
    pub fn from_json(json: &str) -> Result<Self, BlueReceiptError> {
        let order: Self = serde_json::from_str(json)
            .map_err(|e| BlueReceiptError::Config(format!("Invalid order: {}", e)))?;
        order.validate()?;
        Ok(order)
    }

    /// Load an order from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BlueReceiptError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            BlueReceiptError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), BlueReceiptError> {
        if self.items.is_empty() {
            return Err(BlueReceiptError::Config("Order has no items".to_string()));
        }
        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(BlueReceiptError::Config(format!(
                "Item '{}' has zero quantity",
                item.name
            )));
        }
        Ok(())
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::speed_x()
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// A fully formatted receipt, ready to transmit.
///
/// Built as one complete buffer before any socket is opened and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    bytes: Box<[u8]>,
    encoding: ReceiptEncoding,
}

impl Receipt {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn encoding(&self) -> ReceiptEncoding {
        self.encoding
    }
}

/// Build the fixed receipt layout for an order.
pub fn layout(order: &Order, printer: &PrinterConfig) -> Layout {
    let width = printer.columns;

    Layout::new()
        .child(Text::new(order.store_name.as_str()).center().bold())
        .child(Divider::dashed().width(width))
        .child(Columns::new("Item", "Price").width(width))
        .child(Divider::dashed().width(width))
        .children(order.items.iter().map(|item| {
            LineItem::new(item.label(), order.format_money(item.line_total_cents())).width(width)
        }))
        .child(Divider::dashed().width(width))
        .child(Total::new(order.format_money(order.total_cents())).width(width))
        .child(Divider::equals().width(width))
        .child(Text::new(order.footer.as_str()).center())
        .child(BlankLine::new())
        .child(BlankLine::new())
        .cut()
}

/// Format `order` for `printer` in the requested encoding.
pub fn generate_receipt(
    order: &Order,
    printer: &PrinterConfig,
    encoding: ReceiptEncoding,
) -> Receipt {
    Receipt {
        bytes: layout(order, printer).build(encoding).into_boxed_slice(),
        encoding,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Op;

    fn plain(order: &Order) -> String {
        let receipt = generate_receipt(order, &PrinterConfig::default(), ReceiptEncoding::PlainText);
        String::from_utf8(receipt.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_speed_x_totals() {
        let order = Order::speed_x();
        let totals: Vec<u64> = order.items.iter().map(|i| i.line_total_cents()).collect();
        assert_eq!(totals, vec![400, 750, 600]);
        assert_eq!(order.total_cents(), 1750);
        assert_eq!(order.format_money(order.total_cents()), "$17.50");
    }

    #[test]
    fn test_format_money_pads_cents() {
        let order = Order::speed_x();
        assert_eq!(order.format_money(5), "$0.05");
        assert_eq!(order.format_money(100), "$1.00");
    }

    #[test]
    fn test_plain_text_content() {
        let text = plain(&Order::speed_x());
        assert!(text.contains("SPEED X STORE"));
        for (label, price) in [("Apple x2", "$4.00"), ("Banana x5", "$7.50"), ("Orange x3", "$6.00")] {
            assert!(
                text.lines().any(|l| l.starts_with(label) && l.ends_with(price)),
                "missing line for {}",
                label
            );
        }
        assert!(text.lines().any(|l| l.contains("TOTAL") && l.contains("$17.50")));
        assert!(text.ends_with('\n'));
        assert!(!text.bytes().any(|b| b == 0x1B || b == 0x1D));
    }

    #[test]
    fn test_deterministic() {
        let printer = PrinterConfig::default();
        let order = Order::speed_x();
        for encoding in [ReceiptEncoding::PlainText, ReceiptEncoding::EscPos] {
            let a = generate_receipt(&order, &printer, encoding);
            let b = generate_receipt(&order, &printer, encoding);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_escpos_ends_with_cut() {
        let receipt = generate_receipt(&Order::speed_x(), &PrinterConfig::default(), ReceiptEncoding::EscPos);
        assert_eq!(receipt.encoding(), ReceiptEncoding::EscPos);
        assert!(receipt.as_bytes().starts_with(&[0x1B, 0x40]));
        assert!(receipt.as_bytes().ends_with(&[0x1D, 0x56, 0x41, 0x03]));
    }

    #[test]
    fn test_layout_sequence() {
        let program = layout(&Order::speed_x(), &PrinterConfig::MM80.into()).compile();
        let lines = program.lines();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "SPEED X STORE");
        assert_eq!(lines[1], "-".repeat(48));
        assert!(lines[2].starts_with("Item") && lines[2].ends_with("Price"));
        assert_eq!(lines[9], "=".repeat(48));
        assert_eq!(lines[10], "Thank you! Come again");
        assert_eq!(&lines[11..], &["", ""]);
        assert_eq!(*program.ops.last().unwrap(), Op::Cut);
    }

    #[test]
    fn test_order_from_json_defaults() {
        let order = Order::from_json(
            r#"{"store_name":"KIOSK","items":[{"name":"Tea","quantity":1,"unit_price_cents":250}]}"#,
        )
        .unwrap();
        assert_eq!(order.currency, "$");
        assert_eq!(order.footer, "Thank you! Come again");
        assert!(plain(&order).contains("Tea x1"));
    }

    #[test]
    fn test_order_rejects_empty_and_zero_quantity() {
        assert!(Order::from_json(r#"{"store_name":"X","items":[]}"#).is_err());
        assert!(
            Order::from_json(
                r#"{"store_name":"X","items":[{"name":"Tea","quantity":0,"unit_price_cents":1}]}"#
            )
            .is_err()
        );
        assert!(Order::from_json("not json").is_err());
    }
}
