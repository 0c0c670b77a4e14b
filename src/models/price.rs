use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SandPriceRow — One row of the sand price sheet
// ---------------------------------------------------------------------------

/// Price sheet row, joined to variations by `nome`.
///
/// `custo` and `venda` keep the sheet's comma-decimal text; use
/// [`crate::money::parse_decimal`] to read them. `columns` holds every cell
/// of the row in header order for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandPriceRow {
    pub nome: String,
    pub custo: String,
    pub venda: String,
    pub columns: Vec<(String, String)>,
}

impl SandPriceRow {
    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }
}

// ---------------------------------------------------------------------------
// FinancialRow — Per-variation revenue after platform fees and cost
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRow {
    pub variation: String,
    /// Number of product lines carrying this variation (not distinct orders).
    pub order_count: u64,
    pub total_quantity: u64,
    pub sell_price: f64,
    pub cost_price: f64,
    pub total_revenue: f64,
    pub platform_fee: f64,
    pub net_after_fee: f64,
    pub total_cost: f64,
    pub final_net: f64,
}

// ---------------------------------------------------------------------------
// FinancialTotals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTotals {
    pub net_after_fee: f64,
    pub final_net: f64,
}
