//! Order listing, lookup and pagination.

use crate::aggregate::orders_for_variation;
use crate::config::ORDERS_PER_PAGE;
use crate::models::{Order, OrderStatus};

// ---------------------------------------------------------------------------
// OrderQuery
// ---------------------------------------------------------------------------

/// Query interface over the loaded orders (newest first).
pub struct OrderQuery<'a> {
    orders: &'a [Order],
}

impl<'a> OrderQuery<'a> {
    /// Create a new `OrderQuery` over the given orders.
    pub fn new(orders: &'a [Order]) -> Self {
        Self { orders }
    }

    /// All orders, optionally only those with the given status.
    pub fn list(&self, status: Option<OrderStatus>) -> Vec<&'a Order> {
        self.orders
            .iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .collect()
    }

    /// Get an order by its id.
    pub fn get(&self, id: &str) -> Option<&'a Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn count(&self) -> usize {
        self.orders.len()
    }

    pub fn count_by_status(&self, status: OrderStatus) -> usize {
        self.orders.iter().filter(|o| o.status == status).count()
    }

    /// Number of pages of [`ORDERS_PER_PAGE`] orders.
    pub fn page_count(&self) -> usize {
        self.orders.len().div_ceil(ORDERS_PER_PAGE)
    }

    /// Orders on a 1-based page. Out-of-range pages are empty.
    pub fn page(&self, page: usize) -> &'a [Order] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(ORDERS_PER_PAGE);
        if start >= self.orders.len() {
            return &[];
        }
        let end = (start + ORDERS_PER_PAGE).min(self.orders.len());
        &self.orders[start..end]
    }

    /// Orders containing the given variation, pending before packed.
    pub fn for_variation(&self, name: &str, sku: Option<&str>) -> Vec<&'a Order> {
        orders_for_variation(self.orders, name, sku)
    }
}
