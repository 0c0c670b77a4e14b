//! Shared test fixtures for the Packdesk integration tests.
//!
//! Provides sample feed text and `setup_offline_desk()`, which builds an
//! offline `Packdesk` whose cache directory already holds the sample feeds.

#![allow(dead_code)]

use packdesk::{FeedKind, Order, Packdesk, ProductLine};

/// Orders sheet with an extra column, a quoted multi-item cell, an empty
/// `[0]` cell, a row without id, and a short row.
///
/// Loads as A5, A2, A1 (newest first).
pub const ORDERS_TSV: &str = "order_sn\tbuyer\tproduct_info
A1\tana\t[1] Product Name:Areia Higiênica; Variation Name:Lavanda; Price: 19,90; Quantity: 2; SKU Reference No.: AR-LAV
A2\tbia\t\"[1] Product Name:Bolinha; Variation Name:Vermelha; Quantity: 1; SKU Reference No.: BO-RED [2] Product Name:Areia Higiênica; Variation Name:Lavanda; Quantity: 1; SKU Reference No.: AR-LAV\"
A3\tcai\t[0]
\tdan\t[1] Product Name:Bolinha; Quantity: 1
A4\teva
A5\tfab\t[1] Product Name:Areia Higiênica; Variation Name:Lavanda; Quantity: 3
";

/// Toy stock sheet: two valid rows among a non-numeric quantity, a missing
/// SKU and a short row.
pub const STOCK_TSV: &str = "SKU\tProduto\tQuantidade (und)
BO-RED\tBolinha Vermelha\t12
BO-BLU\tBolinha Azul\tabc
\tSem SKU\t4
RAT-01\tRatinho\t7 und
SHORT\tx
";

pub const PRICES_TSV: &str = "nome\tCusto\tvenda\tpeso
Lavanda\t8,50\t19,90\t4kg
Jasmim\t9,00\t21,50\t4kg
";

/// Install a test log subscriber once per test binary.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Build an offline `Packdesk` over a temporary cache directory seeded with
/// the sample feeds, and load them.
///
/// Returns `(Packdesk, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn setup_offline_desk() -> (Packdesk, tempfile::TempDir) {
    init_logging();
    let tmp_dir = tempfile::tempdir().unwrap();
    let mut desk = Packdesk::builder()
        .cache_dir(tmp_dir.path())
        .offline(true)
        .build()
        .unwrap();

    desk.import_feed(FeedKind::Orders, ORDERS_TSV).unwrap();
    desk.import_feed(FeedKind::ToyStock, STOCK_TSV).unwrap();
    desk.import_feed(FeedKind::SandPrices, PRICES_TSV).unwrap();
    desk.reload();

    (desk, tmp_dir)
}

pub fn line(name: &str, variation: &str, quantity: u64, sku: Option<&str>) -> ProductLine {
    ProductLine {
        name: name.to_string(),
        variation: variation.to_string(),
        quantity,
        sku: sku.map(str::to_string),
        parent_sku: None,
    }
}

pub fn order(id: &str, products: Vec<ProductLine>) -> Order {
    Order::new(id, products)
}
