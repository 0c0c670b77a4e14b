//! Feed loaders: turn the published TSV sheets into typed records.
//!
//! The `parse_*` functions work on feed text and report schema problems as
//! errors. The `load_*` functions fetch through a [`FeedCache`] and never
//! fail: transport and schema errors are logged and yield an empty list.

use crate::cache::FeedCache;
use crate::config::FeedKind;
use crate::error::Result;
use crate::models::{Order, SandPriceRow, ToyStockItem};
use crate::parser::parse_product_cell;
use crate::status::{reconcile_statuses, StatusStore};
use crate::tsv::TsvTable;

pub const ORDER_COLUMNS: [&str; 2] = ["order_sn", "product_info"];
pub const STOCK_COLUMNS: [&str; 3] = ["SKU", "Produto", "Quantidade (und)"];
pub const SAND_PRICE_COLUMNS: [&str; 3] = ["nome", "Custo", "venda"];

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the orders sheet.
///
/// Rows that are too short, have no `order_sn`, or carry no valid product
/// are skipped. The result is newest first (the sheet appends at the
/// bottom), and every order starts out pending.
pub fn parse_orders_tsv(text: &str) -> Result<Vec<Order>> {
    let Some(table) = TsvTable::parse(text)? else {
        return Ok(Vec::new());
    };
    let idx = table.require(&ORDER_COLUMNS)?;
    let (id_col, products_col) = (idx[0], idx[1]);
    let width = id_col.max(products_col);

    let mut orders = Vec::with_capacity(table.row_count());
    for (line, cells) in table.rows().enumerate() {
        if cells.len() <= width {
            tracing::debug!(line = line + 2, "skipping short order row");
            continue;
        }
        let id = cells[id_col].trim();
        if id.is_empty() {
            continue;
        }
        let products = parse_product_cell(cells[products_col].trim());
        if products.is_empty() {
            tracing::debug!(order = id, "skipping order without valid products");
            continue;
        }
        orders.push(Order::new(id, products));
    }

    orders.reverse();
    Ok(orders)
}

/// Parse the toy stock sheet.
pub fn parse_stock_tsv(text: &str) -> Result<Vec<ToyStockItem>> {
    let Some(table) = TsvTable::parse(text)? else {
        return Ok(Vec::new());
    };
    let idx = table.require(&STOCK_COLUMNS)?;
    let (sku_col, product_col, qty_col) = (idx[0], idx[1], idx[2]);
    let width = sku_col.max(product_col).max(qty_col);

    let items = table
        .rows()
        .filter(|cells| cells.len() > width)
        .filter_map(|cells| {
            let sku = cells[sku_col].trim();
            let product = cells[product_col].trim();
            let quantity = parse_int(cells[qty_col].trim())?;
            if sku.is_empty() || product.is_empty() {
                return None;
            }
            Some(ToyStockItem {
                sku: sku.to_string(),
                product: product.to_string(),
                quantity,
            })
        })
        .collect();

    Ok(items)
}

/// Parse the sand price sheet. Rows without a `nome` are skipped; every
/// other cell is kept as text.
pub fn parse_sand_prices_tsv(text: &str) -> Result<Vec<SandPriceRow>> {
    let Some(table) = TsvTable::parse(text)? else {
        return Ok(Vec::new());
    };
    let idx = table.require(&SAND_PRICE_COLUMNS)?;
    let (name_col, cost_col, sell_col) = (idx[0], idx[1], idx[2]);
    let width = name_col.max(cost_col).max(sell_col);
    let header = table.header();

    let rows = table
        .rows()
        .filter(|cells| cells.len() > width)
        .filter(|cells| !cells[name_col].trim().is_empty())
        .map(|cells| SandPriceRow {
            nome: cells[name_col].trim().to_string(),
            custo: cells[cost_col].trim().to_string(),
            venda: cells[sell_col].trim().to_string(),
            columns: header
                .iter()
                .zip(cells.iter())
                .map(|(h, v)| (h.to_string(), v.trim().to_string()))
                .collect(),
        })
        .collect();

    Ok(rows)
}

/// Integer with an optional sign followed by digits; trailing text after the
/// digits is ignored ("12 und" reads as 12).
fn parse_int(value: &str) -> Option<i64> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let n: i64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn load<T>(cache: &FeedCache, kind: FeedKind, parse: fn(&str) -> Result<Vec<T>>) -> Vec<T> {
    let text = match cache.fetch(kind) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(feed = %kind, error = %e, "failed to fetch feed");
            return Vec::new();
        }
    };
    match parse(&text) {
        Ok(rows) => {
            tracing::debug!(feed = %kind, rows = rows.len(), "feed loaded");
            rows
        }
        Err(e) => {
            tracing::error!(feed = %kind, error = %e, "failed to parse feed");
            Vec::new()
        }
    }
}

/// Fetch the orders feed and overlay persisted statuses.
pub fn load_orders(cache: &FeedCache, store: &dyn StatusStore) -> Vec<Order> {
    let mut orders = load(cache, FeedKind::Orders, parse_orders_tsv);
    reconcile_statuses(&mut orders, store);
    orders
}

pub fn load_stock(cache: &FeedCache) -> Vec<ToyStockItem> {
    load(cache, FeedKind::ToyStock, parse_stock_tsv)
}

pub fn load_sand_prices(cache: &FeedCache) -> Vec<SandPriceRow> {
    load(cache, FeedKind::SandPrices, parse_sand_prices_tsv)
}
