//! Async wrapper around [`Packdesk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Feed downloads use the blocking HTTP client, so this is where a reload
//! spends its time.
//!
//! # Example
//!
//! ```no_run
//! use packdesk::AsyncPackdesk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let desk = AsyncPackdesk::builder().build().await.unwrap();
//!
//!     // Fetch all feeds concurrently
//!     desk.reload().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let top = desk.run(|d| Ok(d.variations().top(3))).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::{FeedUrls, DEFAULT_REVALIDATE, DEFAULT_TIMEOUT};
use crate::error::{PackdeskError, Result};
use crate::models::OrderStatus;
use crate::{feeds, FeedKind, Packdesk};

// ---------------------------------------------------------------------------
// AsyncPackdeskBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPackdesk`] instance.
///
/// Statuses are kept in the JSON state file; use [`AsyncPackdesk::from_sync`]
/// to wrap an SDK built with a custom status store.
pub struct AsyncPackdeskBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    revalidate: Duration,
    urls: FeedUrls,
    state_file: Option<PathBuf>,
}

impl Default for AsyncPackdeskBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: DEFAULT_TIMEOUT,
            revalidate: DEFAULT_REVALIDATE,
            urls: FeedUrls::default(),
            state_file: None,
        }
    }
}

impl AsyncPackdeskBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for feed downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the cache revalidate window.
    pub fn revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self
    }

    /// Override the source URL of a feed.
    pub fn feed_url(mut self, kind: FeedKind, url: impl Into<String>) -> Self {
        self.urls.set(kind, url);
        self
    }

    /// Keep statuses in a JSON file at `path`.
    pub fn state_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.state_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncPackdesk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Packdesk::builder()
                .offline(self.offline)
                .timeout(self.timeout)
                .revalidate(self.revalidate);
            builder.urls = self.urls;
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(path) = self.state_file {
                builder = builder.state_file(path);
            }
            Ok(AsyncPackdesk::from_sync(builder.build()?))
        })
        .await
        .map_err(|e| PackdeskError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPackdesk
// ---------------------------------------------------------------------------

/// Async wrapper around [`Packdesk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`Packdesk`] is
/// protected by a [`Mutex`].
pub struct AsyncPackdesk {
    inner: Arc<Mutex<Packdesk>>,
}

fn join_error(e: tokio::task::JoinError) -> PackdeskError {
    PackdeskError::InvalidArgument(format!("Task join error: {e}"))
}

impl AsyncPackdesk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncPackdeskBuilder {
        AsyncPackdeskBuilder::default()
    }

    /// Wrap an already-built [`Packdesk`].
    pub fn from_sync(desk: Packdesk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(desk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&mut Packdesk` and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Packdesk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let desk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = desk
                .lock()
                .map_err(|_| PackdeskError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(join_error)?
    }

    /// Fetch the three feeds concurrently, then install them once all have
    /// finished.
    ///
    /// Each feed fails independently to an empty list, as with the sync
    /// loaders.
    pub async fn reload(&self) -> Result<()> {
        let cache = self.run(|d| Ok(d.feeds().clone())).await?;

        let (orders_cache, stock_cache, prices_cache) = (cache.clone(), cache.clone(), cache);
        let orders = tokio::task::spawn_blocking(move || load_orders_unreconciled(&orders_cache));
        let stock = tokio::task::spawn_blocking(move || feeds::load_stock(&stock_cache));
        let prices = tokio::task::spawn_blocking(move || feeds::load_sand_prices(&prices_cache));

        let (orders, stock, prices) = tokio::join!(orders, stock, prices);
        let (orders, stock, prices) = (
            orders.map_err(join_error)?,
            stock.map_err(join_error)?,
            prices.map_err(join_error)?,
        );

        self.run(move |d| {
            d.install(orders, stock, prices);
            Ok(())
        })
        .await
    }

    /// Set the status of one order and persist it.
    pub async fn set_status(&self, order_id: &str, status: OrderStatus) -> Result<bool> {
        let id = order_id.to_string();
        self.run(move |d| d.set_status(&id, status)).await
    }

    /// Set the status of many orders and persist it.
    pub async fn set_status_bulk(&self, order_ids: Vec<String>, status: OrderStatus) -> Result<usize> {
        self.run(move |d| d.set_status_bulk(&order_ids, status)).await
    }

    /// Flip an order between pending and packed.
    pub async fn toggle_status(&self, order_id: &str) -> Result<Option<OrderStatus>> {
        let id = order_id.to_string();
        self.run(move |d| d.toggle_status(&id)).await
    }
}

/// Orders feed without the status overlay; [`Packdesk::install`] applies
/// statuses under the lock.
fn load_orders_unreconciled(cache: &crate::FeedCache) -> Vec<crate::Order> {
    feeds::load_orders(cache, &crate::MemoryStatusStore::new())
}
