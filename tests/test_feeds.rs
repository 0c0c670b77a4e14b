//! Feed parsing and loading tests.

mod common;

use packdesk::feeds::{parse_orders_tsv, parse_sand_prices_tsv, parse_stock_tsv};
use packdesk::tsv::TsvTable;
use packdesk::{OrderStatus, PackdeskError};

// ---------------------------------------------------------------------------
// TsvTable
// ---------------------------------------------------------------------------

#[test]
fn tsv_header_only_has_no_table() {
    assert!(TsvTable::parse("order_sn\tproduct_info\n").unwrap().is_none());
    assert!(TsvTable::parse("").unwrap().is_none());
}

#[test]
fn tsv_columns_found_by_exact_name() {
    let table = TsvTable::parse("a\t b \tc\r\n1\t2\t3").unwrap().unwrap();
    assert_eq!(table.header(), &["a", "b", "c"]);
    assert_eq!(table.column("b"), Some(1));
    assert_eq!(table.column("B"), None);
    assert_eq!(table.row_count(), 1);
}

#[test]
fn tsv_keeps_quotes_and_ragged_rows() {
    let table = TsvTable::parse("id\tinfo\nA1\t\"[1] Product Name:Bolinha\"\nA2\nA3\tx\textra")
        .unwrap()
        .unwrap();
    let rows: Vec<Vec<&str>> = table.rows().map(|r| r.iter().collect()).collect();
    assert_eq!(
        rows,
        vec![
            vec!["A1", "\"[1] Product Name:Bolinha\""],
            vec!["A2"],
            vec!["A3", "x", "extra"],
        ]
    );
}

#[test]
fn tsv_require_lists_missing_columns() {
    let table = TsvTable::parse("a\tb\n1\t2").unwrap().unwrap();
    assert_eq!(table.require(&["b", "a"]).unwrap(), vec![1, 0]);

    let err = table.require(&["a", "x", "y"]).unwrap_err();
    match err {
        PackdeskError::MissingColumns(cols) => assert_eq!(cols, "x, y"),
        other => panic!("unexpected error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[test]
fn orders_are_newest_first_and_filtered() {
    let orders = parse_orders_tsv(common::ORDERS_TSV).unwrap();
    let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["A5", "A2", "A1"]);
    assert!(orders.iter().all(|o| o.status == OrderStatus::Pending));
}

#[test]
fn order_products_come_from_the_product_cell() {
    let orders = parse_orders_tsv(common::ORDERS_TSV).unwrap();
    let a2 = orders.iter().find(|o| o.id == "A2").unwrap();
    assert_eq!(a2.products.len(), 2);
    assert_eq!(a2.products[0].name, "Bolinha");
    assert_eq!(a2.products[1].sku.as_deref(), Some("AR-LAV"));
}

#[test]
fn orders_header_only_is_empty() {
    let orders = parse_orders_tsv("order_sn\tproduct_info").unwrap();
    assert!(orders.is_empty());
}

#[test]
fn orders_missing_column_is_an_error() {
    let err = parse_orders_tsv("order_sn\tproducts\nA1\t[1] Product Name:X; Quantity:1").unwrap_err();
    assert!(matches!(err, PackdeskError::MissingColumns(_)));
}

#[test]
fn orders_column_order_is_not_fixed() {
    let text = "product_info\torder_sn\n[1] Product Name:X; Quantity:1\tB1";
    let orders = parse_orders_tsv(text).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "B1");
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

#[test]
fn stock_skips_invalid_rows() {
    let items = parse_stock_tsv(common::STOCK_TSV).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].sku, "BO-RED");
    assert_eq!(items[0].product, "Bolinha Vermelha");
    assert_eq!(items[0].quantity, 12);
    assert_eq!(items[1].sku, "RAT-01");
    assert_eq!(items[1].quantity, 7);
}

#[test]
fn stock_header_only_is_empty() {
    assert!(parse_stock_tsv("SKU\tProduto\tQuantidade (und)\n").unwrap().is_empty());
}

#[test]
fn stock_missing_column_is_an_error() {
    let err = parse_stock_tsv("SKU\tProduto\tQtd\nA\tB\t1").unwrap_err();
    assert!(matches!(err, PackdeskError::MissingColumns(_)));
}

// ---------------------------------------------------------------------------
// Sand prices
// ---------------------------------------------------------------------------

#[test]
fn sand_prices_keep_all_columns() {
    let rows = parse_sand_prices_tsv(common::PRICES_TSV).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].nome, "Lavanda");
    assert_eq!(rows[0].custo, "8,50");
    assert_eq!(rows[0].venda, "19,90");
    assert_eq!(rows[0].column("peso"), Some("4kg"));
    assert_eq!(rows[0].columns.len(), 4);
}

// ---------------------------------------------------------------------------
// Loading through the cache
// ---------------------------------------------------------------------------

#[test]
fn offline_desk_loads_all_feeds() {
    let (desk, _tmp) = common::setup_offline_desk();
    assert_eq!(desk.orders().count(), 3);
    assert_eq!(desk.stock().list().len(), 2);
    assert_eq!(desk.reports().prices().len(), 2);
}

#[test]
fn uncached_feed_offline_loads_empty() {
    common::init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let desk = packdesk::Packdesk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();

    assert!(desk.load_orders().is_empty());
    assert!(desk.load_stock().is_empty());
    assert!(desk.load_sand_prices().is_empty());
}

#[test]
fn feed_missing_columns_loads_empty() {
    let (desk, _tmp) = common::setup_offline_desk();
    desk.import_feed(packdesk::FeedKind::Orders, "id\tproducts\nA1\t[1] Product Name:X; Quantity:1")
        .unwrap();
    assert!(desk.load_orders().is_empty());
}

#[test]
fn unreachable_feed_loads_empty() {
    common::init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let desk = packdesk::Packdesk::builder()
        .cache_dir(tmp.path())
        .feed_url(packdesk::FeedKind::ToyStock, "http://127.0.0.1:9/stock.tsv")
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();

    assert!(desk.load_stock().is_empty());
}

#[test]
fn sand_prices_without_url_load_empty() {
    common::init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let desk = packdesk::Packdesk::builder()
        .cache_dir(tmp.path())
        .build()
        .unwrap();

    assert!(desk.load_sand_prices().is_empty());
}
