//! Toy stock lookups.

use crate::models::ToyStockItem;

/// Query interface over the toy stock sheet.
pub struct StockQuery<'a> {
    items: &'a [ToyStockItem],
}

impl<'a> StockQuery<'a> {
    /// Create a new `StockQuery` over the given stock rows.
    pub fn new(items: &'a [ToyStockItem]) -> Self {
        Self { items }
    }

    pub fn list(&self) -> &'a [ToyStockItem] {
        self.items
    }

    /// Items whose product name or SKU contains `term` (case-insensitive).
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&'a ToyStockItem> {
        let term = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.product.to_lowercase().contains(&term)
                    || item.sku.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn find_by_sku(&self, sku: &str) -> Option<&'a ToyStockItem> {
        self.items.iter().find(|item| item.sku == sku)
    }
}
