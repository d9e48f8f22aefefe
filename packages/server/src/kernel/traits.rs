// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Decision logic (validation, identifier resolution, aggregation) lives in
// domains/stock/activities and only talks to the catalog through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseCatalogStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::stock::models::{CatalogProduct, StockStatus};

// =============================================================================
// Catalog Store Trait (Infrastructure - product records and stock levels)
// =============================================================================

/// External product catalog.
///
/// Every `Err` returned here is treated as an unexpected fault by callers.
/// Expected outcomes ("not found", "write refused") are expressed in the
/// `Ok` value instead.
#[async_trait]
pub trait BaseCatalogStore: Send + Sync {
    /// Whether the catalog can serve requests at all
    async fn is_available(&self) -> bool;

    /// Ids of records (any kind) whose SKU equals `sku` exactly.
    ///
    /// Returns at most `limit` distinct positive ids in ascending order.
    async fn find_product_ids_by_sku(&self, sku: &str, limit: usize) -> Result<Vec<i64>>;

    /// Load one record by id
    async fn get_product(&self, id: i64) -> Result<Option<CatalogProduct>>;

    /// Turn on quantity tracking for a record
    async fn enable_stock_management(&self, id: i64) -> Result<()>;

    /// Write an absolute quantity.
    ///
    /// Returns the stored quantity, or `None` when the store refused the write.
    async fn set_stock_quantity(&self, id: i64, qty: i64) -> Result<Option<i64>>;

    /// Write the availability status
    async fn set_stock_status(&self, id: i64, status: StockStatus) -> Result<()>;
}

// =============================================================================
// Stock Logger Trait (Infrastructure - structured event sink)
// =============================================================================

/// Sink for stock-control events. Logging never gates behavior.
pub trait BaseStockLogger: Send + Sync {
    fn log(&self, message: &str, context: serde_json::Value);
}
