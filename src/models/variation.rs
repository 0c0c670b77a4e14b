use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// VariationSummary — Units sold per (variation, SKU)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationSummary {
    pub name: String,
    pub sku: Option<String>,
    pub quantity: u64,
}

// ---------------------------------------------------------------------------
// ProductTotals — Sand vs. everything else
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTotals {
    pub order_count: usize,
    pub sand_units: u64,
    pub other_units: u64,
}
