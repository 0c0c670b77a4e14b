use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ProductLine — One line item inside an order's product cell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub name: String,
    /// `"-"` when the source cell left the variation blank.
    pub variation: String,
    pub quantity: u64,
    pub sku: Option<String>,
    pub parent_sku: Option<String>,
}

impl ProductLine {
    /// Whether this line is a sand product ("areia", any case).
    pub fn is_sand(&self) -> bool {
        self.name.to_lowercase().contains("areia")
    }

    /// Whether this line belongs to the variation identified by `name` and `sku`.
    pub fn matches_variation(&self, name: &str, sku: Option<&str>) -> bool {
        self.variation == name && self.sku.as_deref() == sku
    }
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Packed,
}

impl OrderStatus {
    /// The token persisted in the status store.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Packed => "packed",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            OrderStatus::Pending => OrderStatus::Packed,
            OrderStatus::Packed => OrderStatus::Pending,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = crate::error::PackdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "packed" => Ok(OrderStatus::Packed),
            other => Err(crate::error::PackdeskError::InvalidArgument(format!(
                "unknown order status: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub products: Vec<ProductLine>,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(id: impl Into<String>, products: Vec<ProductLine>) -> Self {
        Self {
            id: id.into(),
            products,
            status: OrderStatus::Pending,
        }
    }

    pub fn is_packed(&self) -> bool {
        self.status == OrderStatus::Packed
    }

    /// Whether any line of this order belongs to the given variation.
    pub fn has_variation(&self, name: &str, sku: Option<&str>) -> bool {
        self.products.iter().any(|p| p.matches_variation(name, sku))
    }
}
