//! Financial report over pending orders joined to the sand price sheet.

use crate::aggregate::{compute_financial_report, report_totals};
use crate::models::{FinancialRow, FinancialTotals, Order, OrderStatus, SandPriceRow};
use crate::summary::financial_summary_text;

// ---------------------------------------------------------------------------
// ReportQuery
// ---------------------------------------------------------------------------

/// Query interface for the financial report.
///
/// Only pending orders are reported: packed orders have already been
/// accounted for when they shipped.
pub struct ReportQuery<'a> {
    orders: &'a [Order],
    prices: &'a [SandPriceRow],
}

impl<'a> ReportQuery<'a> {
    /// Create a new `ReportQuery` over orders and price rows.
    pub fn new(orders: &'a [Order], prices: &'a [SandPriceRow]) -> Self {
        Self { orders, prices }
    }

    fn pending(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .cloned()
            .collect()
    }

    /// One row per priced variation among pending orders.
    pub fn financial(&self) -> Vec<FinancialRow> {
        compute_financial_report(&self.pending(), self.prices)
    }

    pub fn totals(&self) -> FinancialTotals {
        report_totals(&self.financial())
    }

    /// The price sheet rows as loaded.
    pub fn prices(&self) -> &'a [SandPriceRow] {
        self.prices
    }

    /// Report as WhatsApp-ready text, or `None` if no variation is priced.
    pub fn text(&self) -> Option<String> {
        financial_summary_text(&self.financial())
    }
}
