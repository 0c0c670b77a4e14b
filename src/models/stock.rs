use serde::{Deserialize, Serialize};

/// One row of the toy stock sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToyStockItem {
    pub sku: String,
    pub product: String,
    pub quantity: i64,
}
