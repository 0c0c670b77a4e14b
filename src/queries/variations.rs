//! Sales-by-variation views.

use std::collections::HashSet;

use crate::aggregate::{aggregate_variations, orders_for_variation, product_totals};
use crate::models::{Order, ProductTotals, VariationSummary};
use crate::summary::variation_summary_text;

// ---------------------------------------------------------------------------
// VariationQuery
// ---------------------------------------------------------------------------

/// Query interface for units sold per variation.
pub struct VariationQuery<'a> {
    orders: &'a [Order],
}

impl<'a> VariationQuery<'a> {
    /// Create a new `VariationQuery` over the given orders.
    pub fn new(orders: &'a [Order]) -> Self {
        Self { orders }
    }

    /// Every variation, best-selling first.
    pub fn summaries(&self) -> Vec<VariationSummary> {
        aggregate_variations(self.orders)
    }

    /// The `n` best-selling variations.
    pub fn top(&self, n: usize) -> Vec<VariationSummary> {
        let mut all = self.summaries();
        all.truncate(n);
        all
    }

    /// Variations whose name or SKU contains `term` (case-insensitive).
    pub fn search(&self, term: &str) -> Vec<VariationSummary> {
        let term = term.to_lowercase();
        self.summaries()
            .into_iter()
            .filter(|v| {
                v.name.to_lowercase().contains(&term)
                    || v.sku
                        .as_deref()
                        .is_some_and(|sku| sku.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Orders containing `variation`, pending before packed.
    pub fn orders(&self, variation: &VariationSummary) -> Vec<&'a Order> {
        orders_for_variation(self.orders, &variation.name, variation.sku.as_deref())
    }

    pub fn order_count(&self, variation: &VariationSummary) -> usize {
        self.orders(variation).len()
    }

    /// Whether every order containing `variation` is packed. False when no
    /// order contains it.
    pub fn all_packed(&self, variation: &VariationSummary) -> bool {
        let orders = self.orders(variation);
        !orders.is_empty() && orders.iter().all(|o| o.is_packed())
    }

    /// Number of distinct orders containing any of `variations`.
    pub fn unique_order_count(&self, variations: &[VariationSummary]) -> usize {
        let mut ids: HashSet<&str> = HashSet::new();
        for variation in variations {
            ids.extend(self.orders(variation).into_iter().map(|o| o.id.as_str()));
        }
        ids.len()
    }

    /// Sand units versus other units across all orders.
    pub fn product_totals(&self) -> ProductTotals {
        product_totals(self.orders)
    }

    /// WhatsApp-ready summary of `variations`, or `None` if there are none.
    pub fn whatsapp_summary(&self, variations: &[VariationSummary]) -> Option<String> {
        variation_summary_text(variations, self.orders)
    }
}
