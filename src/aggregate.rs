//! Aggregations over the loaded orders.
//!
//! Everything here is recomputed from the order list on each call; nothing
//! is cached between calls.

use std::collections::HashMap;

use crate::models::{
    FinancialRow, FinancialTotals, Order, OrderStatus, ProductTotals, SandPriceRow,
    VariationSummary,
};
use crate::money::parse_decimal;

/// Marketplace commission taken from each sale.
pub const PLATFORM_FEE_RATE: f64 = 0.20;
/// Flat marketplace fee per sold line.
pub const PLATFORM_FIXED_FEE: f64 = 4.00;

// ---------------------------------------------------------------------------
// Variations
// ---------------------------------------------------------------------------

/// Units sold per (variation, SKU), largest first.
///
/// Lines without a SKU share one bucket per variation name. Ties keep the
/// order in which the variations were first seen.
pub fn aggregate_variations(orders: &[Order]) -> Vec<VariationSummary> {
    let mut index: HashMap<(&str, Option<&str>), usize> = HashMap::new();
    let mut summaries: Vec<VariationSummary> = Vec::new();

    for product in orders.iter().flat_map(|o| &o.products) {
        let key = (product.variation.as_str(), product.sku.as_deref());
        match index.get(&key).copied() {
            Some(i) => summaries[i].quantity = summaries[i].quantity.saturating_add(product.quantity),
            None => {
                index.insert(key, summaries.len());
                summaries.push(VariationSummary {
                    name: product.variation.clone(),
                    sku: product.sku.clone(),
                    quantity: product.quantity,
                });
            }
        }
    }

    summaries.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    summaries
}

/// Units of sand versus everything else, plus the number of orders.
pub fn product_totals(orders: &[Order]) -> ProductTotals {
    let mut totals = ProductTotals {
        order_count: orders.len(),
        ..ProductTotals::default()
    };
    for product in orders.iter().flat_map(|o| &o.products) {
        if product.is_sand() {
            totals.sand_units = totals.sand_units.saturating_add(product.quantity);
        } else {
            totals.other_units = totals.other_units.saturating_add(product.quantity);
        }
    }
    totals
}

/// Orders containing the given variation, pending before packed.
pub fn orders_for_variation<'a>(
    orders: &'a [Order],
    name: &str,
    sku: Option<&str>,
) -> Vec<&'a Order> {
    let mut matching: Vec<&Order> = orders
        .iter()
        .filter(|o| o.has_variation(name, sku))
        .collect();
    matching.sort_by_key(|o| o.status == OrderStatus::Packed);
    matching
}

// ---------------------------------------------------------------------------
// Financial report
// ---------------------------------------------------------------------------

/// Revenue, marketplace fees and cost per variation, for variations that
/// have a row in the price sheet.
///
/// Variations are keyed by name only (SKU is ignored) and `order_count`
/// counts product lines, so an order with two lines of the same variation
/// counts twice. Rows are sorted by `order_count`, largest first.
pub fn compute_financial_report(orders: &[Order], prices: &[SandPriceRow]) -> Vec<FinancialRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u64, u64)> = Vec::new();

    for product in orders.iter().flat_map(|o| &o.products) {
        let name = product.variation.as_str();
        let i = *index.entry(name).or_insert_with(|| {
            counts.push((name, 0, 0));
            counts.len() - 1
        });
        counts[i].1 += 1;
        counts[i].2 = counts[i].2.saturating_add(product.quantity);
    }

    let mut rows: Vec<FinancialRow> = counts
        .into_iter()
        .filter_map(|(name, order_count, total_quantity)| {
            let price = prices.iter().find(|p| p.nome == name)?;
            let (Some(sell_price), Some(cost_price)) =
                (parse_decimal(&price.venda), parse_decimal(&price.custo))
            else {
                tracing::warn!(variation = name, venda = %price.venda, custo = %price.custo, "unreadable price row");
                return None;
            };
            Some(financial_row(name, order_count, total_quantity, sell_price, cost_price))
        })
        .collect();

    rows.sort_by(|a, b| b.order_count.cmp(&a.order_count));
    rows
}

fn financial_row(
    name: &str,
    order_count: u64,
    total_quantity: u64,
    sell_price: f64,
    cost_price: f64,
) -> FinancialRow {
    let count = order_count as f64;
    let total_revenue = sell_price * count;
    let platform_fee = total_revenue * PLATFORM_FEE_RATE + PLATFORM_FIXED_FEE * count;
    let net_after_fee = total_revenue - platform_fee;
    let total_cost = cost_price * count;

    FinancialRow {
        variation: name.to_string(),
        order_count,
        total_quantity,
        sell_price,
        cost_price,
        total_revenue,
        platform_fee,
        net_after_fee,
        total_cost,
        final_net: net_after_fee - total_cost,
    }
}

/// Sum of wallet value (after fees) and final net across report rows.
pub fn report_totals(rows: &[FinancialRow]) -> FinancialTotals {
    rows.iter().fold(FinancialTotals::default(), |mut acc, row| {
        acc.net_after_fee += row.net_after_fee;
        acc.final_net += row.final_net;
        acc
    })
}
