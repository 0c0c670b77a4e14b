//! Product cell parser.
//!
//! The orders sheet packs every line item of an order into one cell:
//!
//! ```text
//! [1] Product Name:Areia Fina; Variation Name:Lavanda; Price: 19,90; Quantity: 2; SKU Reference No.: AR-LAV
//! [2] Product Name:Bolinha; Variation Name:; Quantity: 1
//! ```
//!
//! Bracketed indices separate the items, `;` separates fields and the first
//! `:` of a field separates its label from its value.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::ProductLine;

/// Variation used when the cell leaves the variation blank.
pub const NO_VARIATION: &str = "-";

// ---------------------------------------------------------------------------
// Field labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Variation,
    Price,
    Quantity,
    Sku,
    ParentSku,
}

/// Labels are matched by containment, first match wins. "Parent SKU
/// Reference No." also contains "SKU Reference No.", so a parent SKU field
/// lands in `sku`; the marketplace writes it after the item SKU, which makes
/// the parent the grouping SKU of the line.
const FIELD_LABELS: [(&str, Field); 6] = [
    ("Product Name", Field::Name),
    ("Variation Name", Field::Variation),
    ("Price", Field::Price),
    ("Quantity", Field::Quantity),
    ("SKU Reference No.", Field::Sku),
    ("Parent SKU Reference No.", Field::ParentSku),
];

fn classify(key: &str) -> Option<Field> {
    FIELD_LABELS
        .iter()
        .find(|(label, _)| key.contains(label))
        .map(|(_, field)| *field)
}

fn item_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[0-9]+\]").expect("valid item marker pattern"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse one raw product cell into its line items, in cell order.
///
/// Never fails: an empty cell (or the literal `[0]`) yields no products, and
/// items missing a name or a positive quantity are dropped.
pub fn parse_product_cell(raw: &str) -> Vec<ProductLine> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "[0]" {
        return Vec::new();
    }

    let cleaned = normalize(raw);

    item_marker()
        .split(&cleaned)
        .filter(|item| !item.trim().is_empty())
        .filter_map(parse_item)
        .collect()
}

/// Strip quotes and fold line breaks and whitespace runs into single spaces.
fn normalize(raw: &str) -> String {
    let unquoted = raw.replace('"', "");
    let unbroken = unquoted.replace("\r\n", " ").replace(['\n', '\r'], " ");
    whitespace_run()
        .replace_all(&unbroken, " ")
        .trim()
        .to_string()
}

#[derive(Default)]
struct PartialLine {
    name: Option<String>,
    variation: Option<String>,
    quantity: Option<u64>,
    sku: Option<String>,
    parent_sku: Option<String>,
}

fn parse_item(item: &str) -> Option<ProductLine> {
    let mut line = PartialLine::default();

    for field in item.split(';').map(str::trim) {
        let Some((key, value)) = field.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match classify(key.trim()) {
            Some(Field::Name) => line.name = Some(value.to_string()),
            Some(Field::Variation) => {
                let variation = if value.is_empty() { NO_VARIATION } else { value };
                line.variation = Some(variation.to_string());
            }
            Some(Field::Price) | None => {}
            Some(Field::Quantity) => line.quantity = parse_quantity(value),
            Some(Field::ParentSku) => line.parent_sku = non_empty(value),
            Some(Field::Sku) => line.sku = non_empty(value),
        }
    }

    let name = line.name.filter(|n| !n.is_empty())?;
    let quantity = line.quantity.filter(|q| *q > 0)?;

    Some(ProductLine {
        name,
        variation: line.variation.unwrap_or_else(|| NO_VARIATION.to_string()),
        quantity,
        sku: line.sku,
        parent_sku: line.parent_sku,
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Read the leading base-10 digits of a quantity value ("3", "3 un", "+3").
///
/// Anything without leading digits, or a negative number, is no quantity.
/// Values too large for `u64` saturate.
pub(crate) fn parse_quantity(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let digits = &value[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}
