//! Query modules for the packing dashboard.
//!
//! Each module provides a query struct that borrows the loaded data (orders,
//! stock or price rows) and exposes read-only views over it. Aggregates are
//! recomputed on every call.

pub mod orders;
pub mod reports;
pub mod stock;
pub mod variations;

pub use orders::OrderQuery;
pub use reports::ReportQuery;
pub use stock::StockQuery;
pub use variations::VariationQuery;
