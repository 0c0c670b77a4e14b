//! Packdesk SDK for Rust.
//!
//! Loads the shop's published spreadsheet feeds (orders, toy stock and sand
//! prices) as TSV, tracks which orders have been packed, and aggregates
//! sales per product variation for the packing dashboard and its reports.
//!
//! # Quick start
//!
//! ```no_run
//! use packdesk::{OrderStatus, Packdesk};
//!
//! let mut desk = Packdesk::builder().build().unwrap();
//! desk.reload();
//!
//! // Best-selling variations
//! for v in desk.variations().top(3) {
//!     println!("{} ({:?}): {}", v.name, v.sku, v.quantity);
//! }
//!
//! // Mark an order as packed
//! desk.set_status("250101ABCDEF", OrderStatus::Packed).unwrap();
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod feeds;
pub mod models;
pub mod money;
pub mod parser;
pub mod queries;
pub mod schedule;
pub mod status;
pub mod summary;
pub mod tsv;

pub use aggregate::{aggregate_variations, compute_financial_report};
#[cfg(feature = "async")]
pub use async_client::AsyncPackdesk;
pub use cache::FeedCache;
pub use config::{FeedKind, FeedUrls};
pub use error::{PackdeskError, Result};
pub use models::{
    FinancialRow, FinancialTotals, Order, OrderStatus, ProductLine, ProductTotals, SandPriceRow,
    ToyStockItem, VariationSummary,
};
pub use parser::parse_product_cell;
pub use status::{FileStatusStore, MemoryStatusStore, StatusStore};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// PackdeskBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Packdesk`] instance.
///
/// Use [`Packdesk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PackdeskBuilder::build) to create the SDK.
pub struct PackdeskBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    revalidate: Duration,
    urls: FeedUrls,
    store: Option<Box<dyn StatusStore>>,
    state_file: Option<PathBuf>,
}

impl Default for PackdeskBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            revalidate: config::DEFAULT_REVALIDATE,
            urls: FeedUrls::default(),
            store: None,
            state_file: None,
        }
    }
}

impl PackdeskBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/packdesk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, feeds are never downloaded; only previously cached
    /// copies are read. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for feed downloads.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a downloaded feed is served from cache before it is fetched
    /// again. Defaults to 60 seconds; zero always re-downloads.
    pub fn revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self
    }

    /// Override the source URL of a feed.
    pub fn feed_url(mut self, kind: FeedKind, url: impl Into<String>) -> Self {
        self.urls.set(kind, url);
        self
    }

    /// Use a custom status store instead of the JSON file in the cache
    /// directory.
    pub fn status_store<S: StatusStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Keep statuses in a JSON file at `path`.
    ///
    /// Defaults to `order_status.json` inside the cache directory. Ignored
    /// when a custom [`status_store`](Self::status_store) is set.
    pub fn state_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.state_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the SDK, preparing the cache directory and status store.
    ///
    /// No feed is downloaded until [`Packdesk::reload`] or one of the
    /// `load_*` methods is called.
    pub fn build(self) -> Result<Packdesk> {
        let feeds = FeedCache::new(
            self.cache_dir,
            self.offline,
            self.timeout,
            self.revalidate,
            self.urls,
        )?;
        let store = match self.store {
            Some(store) => store,
            None => {
                let path = self
                    .state_file
                    .unwrap_or_else(|| feeds.cache_dir.join("order_status.json"));
                Box::new(FileStatusStore::open(path)?)
            }
        };
        Ok(Packdesk {
            feeds,
            store,
            orders: Vec::new(),
            stock: Vec::new(),
            prices: Vec::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Packdesk
// ---------------------------------------------------------------------------

/// The main entry point for the Packdesk SDK.
///
/// Owns the feed cache, the status store and the most recently loaded
/// orders, stock and prices. Query accessors are lightweight borrowing
/// wrappers; status changes go through this type so they are persisted.
///
/// Created via [`Packdesk::builder()`].
pub struct Packdesk {
    feeds: FeedCache,
    store: Box<dyn StatusStore>,
    orders: Vec<Order>,
    stock: Vec<ToyStockItem>,
    prices: Vec<SandPriceRow>,
}

impl Packdesk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PackdeskBuilder {
        PackdeskBuilder::default()
    }

    // -- Loading -----------------------------------------------------------

    /// Fetch and parse the orders feed with persisted statuses applied.
    ///
    /// Never fails: an unreachable feed or a sheet missing its columns is
    /// logged and yields an empty list. Does not replace the loaded orders;
    /// see [`reload`](Self::reload).
    pub fn load_orders(&self) -> Vec<Order> {
        feeds::load_orders(&self.feeds, &*self.store)
    }

    /// Fetch and parse the toy stock feed. Same failure contract as
    /// [`load_orders`](Self::load_orders).
    pub fn load_stock(&self) -> Vec<ToyStockItem> {
        feeds::load_stock(&self.feeds)
    }

    /// Fetch and parse the sand price feed. Same failure contract as
    /// [`load_orders`](Self::load_orders).
    pub fn load_sand_prices(&self) -> Vec<SandPriceRow> {
        feeds::load_sand_prices(&self.feeds)
    }

    /// Load every feed and replace the held data.
    pub fn reload(&mut self) {
        let orders = self.load_orders();
        let stock = self.load_stock();
        let prices = self.load_sand_prices();
        self.install(orders, stock, prices);
    }

    /// Replace the held data with feeds loaded elsewhere. Statuses are
    /// re-read from the store.
    pub fn install(
        &mut self,
        mut orders: Vec<Order>,
        stock: Vec<ToyStockItem>,
        prices: Vec<SandPriceRow>,
    ) {
        crate::status::reconcile_statuses(&mut orders, &*self.store);
        tracing::info!(
            orders = orders.len(),
            stock = stock.len(),
            prices = prices.len(),
            "dashboard data loaded"
        );
        self.orders = orders;
        self.stock = stock;
        self.prices = prices;
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the order query interface.
    pub fn orders(&self) -> queries::OrderQuery<'_> {
        queries::OrderQuery::new(&self.orders)
    }

    /// Access the variation summary interface.
    ///
    /// Summaries are recomputed from the loaded orders on every call.
    pub fn variations(&self) -> queries::VariationQuery<'_> {
        queries::VariationQuery::new(&self.orders)
    }

    /// Access the toy stock interface.
    pub fn stock(&self) -> queries::StockQuery<'_> {
        queries::StockQuery::new(&self.stock)
    }

    /// Access the financial report interface.
    pub fn reports(&self) -> queries::ReportQuery<'_> {
        queries::ReportQuery::new(&self.orders, &self.prices)
    }

    // -- Status changes ----------------------------------------------------

    /// Set the status of one order and persist it.
    ///
    /// Returns `true` if a loaded order changed.
    pub fn set_status(&mut self, order_id: &str, status: OrderStatus) -> Result<bool> {
        let changed =
            crate::status::apply_status(&mut self.orders, &mut *self.store, &[order_id], status)?;
        Ok(changed > 0)
    }

    /// Set the status of many orders and persist it. Returns how many loaded
    /// orders changed.
    pub fn set_status_bulk<S: AsRef<str>>(&mut self, order_ids: &[S], status: OrderStatus) -> Result<usize> {
        crate::status::apply_status(&mut self.orders, &mut *self.store, order_ids, status)
    }

    /// Flip an order between pending and packed.
    ///
    /// Returns the new status, or `None` if no loaded order has that id.
    pub fn toggle_status(&mut self, order_id: &str) -> Result<Option<OrderStatus>> {
        let Some(current) = self.orders().get(order_id).map(|o| o.status) else {
            return Ok(None);
        };
        let next = current.toggled();
        self.set_status(order_id, next)?;
        Ok(Some(next))
    }

    /// Set `status` on every order containing the variation that does not
    /// already have it.
    ///
    /// Returns the ids that changed; an empty list means there was nothing
    /// to change.
    pub fn mark_variation(
        &mut self,
        name: &str,
        sku: Option<&str>,
        status: OrderStatus,
    ) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .orders()
            .for_variation(name, sku)
            .into_iter()
            .filter(|o| o.status != status)
            .map(|o| o.id.clone())
            .collect();
        if !ids.is_empty() {
            self.set_status_bulk(&ids, status)?;
        }
        Ok(ids)
    }

    // -- Cache -------------------------------------------------------------

    /// Return a reference to the underlying [`FeedCache`].
    pub fn feeds(&self) -> &FeedCache {
        &self.feeds
    }

    /// Store a manually exported sheet as the cached copy of a feed.
    pub fn import_feed(&self, kind: FeedKind, text: &str) -> Result<()> {
        self.feeds.import(kind, text)
    }

    /// Remove every cached feed so the next load downloads them again.
    pub fn clear_cache(&self) -> Result<()> {
        self.feeds.clear()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Packdesk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packdesk(cache_dir={}, orders={}, stock={}, prices={}, offline={})",
            self.feeds.cache_dir.display(),
            self.orders.len(),
            self.stock.len(),
            self.prices.len(),
            self.feeds.offline
        )
    }
}
