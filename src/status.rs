//! Persisted packing status.
//!
//! Statuses live outside the feeds, in a key-value store keyed by
//! `order_status_<order id>`. Every load overlays them onto the freshly
//! parsed orders; every status change writes through to the store.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::STATUS_KEY_PREFIX;
use crate::error::Result;
use crate::models::{Order, OrderStatus};

// ---------------------------------------------------------------------------
// StatusStore
// ---------------------------------------------------------------------------

/// Key-value storage for order statuses.
pub trait StatusStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

pub fn status_key(order_id: &str) -> String {
    format!("{}{}", STATUS_KEY_PREFIX, order_id)
}

/// The persisted status of an order, or pending when none (or an unknown
/// token) is stored.
pub fn read_status(store: &dyn StatusStore, order_id: &str) -> OrderStatus {
    store
        .get(&status_key(order_id))
        .and_then(|token| token.parse().ok())
        .unwrap_or_default()
}

pub fn write_status(store: &mut dyn StatusStore, order_id: &str, status: OrderStatus) -> Result<()> {
    store.set(&status_key(order_id), status.as_str())
}

/// Overlay persisted statuses onto `orders`.
pub fn reconcile_statuses(orders: &mut [Order], store: &dyn StatusStore) {
    for order in orders.iter_mut() {
        order.status = read_status(store, &order.id);
    }
}

/// Set `status` on every order in `ids` and persist it.
///
/// Ids that are not in `orders` are still persisted, so the status applies
/// once the order shows up in a later load. Returns how many loaded orders
/// changed.
pub fn apply_status<S: AsRef<str>>(
    orders: &mut [Order],
    store: &mut dyn StatusStore,
    ids: &[S],
    status: OrderStatus,
) -> Result<usize> {
    let mut changed = 0;
    for id in ids {
        let id = id.as_ref();
        for order in orders.iter_mut().filter(|o| o.id == id) {
            if order.status != status {
                order.status = status;
                changed += 1;
            }
        }
        write_status(store, id, status)?;
    }
    Ok(changed)
}

// ---------------------------------------------------------------------------
// MemoryStatusStore
// ---------------------------------------------------------------------------

/// In-memory store; statuses are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatusStore {
    values: HashMap<String, String>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusStore for MemoryStatusStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStatusStore
// ---------------------------------------------------------------------------

/// Store backed by a JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStatusStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStatusStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// An unreadable or corrupt file is logged and treated as empty; it is
    /// replaced on the next write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt status file, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StatusStore for FileStatusStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}
