// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::{BaseCatalogStore, BaseStockLogger, InMemoryCatalog, ServerDeps};
use crate::domains::stock::models::{CatalogProduct, StockStatus};

// =============================================================================
// Mock Catalog Store
// =============================================================================

/// A call made against the catalog, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    IsAvailable,
    FindProductIdsBySku { sku: String, limit: usize },
    GetProduct(i64),
    EnableStockManagement(i64),
    SetStockQuantity { id: i64, qty: i64 },
    SetStockStatus { id: i64, status: StockStatus },
}

impl CatalogCall {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            CatalogCall::EnableStockManagement(_)
                | CatalogCall::SetStockQuantity { .. }
                | CatalogCall::SetStockStatus { .. }
        )
    }
}

#[derive(Default)]
struct FaultPlan {
    failing_ids: HashSet<i64>,
    panicking_ids: HashSet<i64>,
    failing_skus: HashSet<String>,
    refused_writes: HashSet<i64>,
    missing_after_write: HashSet<i64>,
}

/// Catalog backed by `InMemoryCatalog` that records calls and injects faults
pub struct MockCatalogStore {
    inner: InMemoryCatalog,
    calls: Arc<Mutex<Vec<CatalogCall>>>,
    faults: Arc<Mutex<FaultPlan>>,
}

impl MockCatalogStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryCatalog::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            faults: Arc::new(Mutex::new(FaultPlan::default())),
        }
    }

    pub fn with_products(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        Self {
            inner: InMemoryCatalog::with_products(products),
            ..Self::new()
        }
    }

    /// Report the catalog as unavailable
    pub fn unavailable(self) -> Self {
        self.inner.set_available(false);
        self
    }

    /// Loading this product returns an error
    pub fn failing_on(self, id: i64) -> Self {
        self.faults.lock().unwrap().failing_ids.insert(id);
        self
    }

    /// Loading this product panics
    pub fn panicking_on(self, id: i64) -> Self {
        self.faults.lock().unwrap().panicking_ids.insert(id);
        self
    }

    /// Looking up this SKU returns an error
    pub fn failing_sku(self, sku: &str) -> Self {
        self.faults.lock().unwrap().failing_skus.insert(sku.to_string());
        self
    }

    /// Quantity writes for this product are refused
    pub fn refusing_writes_for(self, id: i64) -> Self {
        self.faults.lock().unwrap().refused_writes.insert(id);
        self
    }

    /// The product cannot be re-read once its quantity was written
    pub fn missing_after_write(self, id: i64) -> Self {
        self.faults.lock().unwrap().missing_after_write.insert(id);
        self
    }

    /// Get all calls made so far
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls that changed catalog state
    pub fn mutation_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_mutation())
            .count()
    }

    /// Current state of a record, bypassing fault injection
    pub async fn product(&self, id: i64) -> Option<CatalogProduct> {
        self.inner.get_product(id).await.ok().flatten()
    }

    fn record(&self, call: CatalogCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn was_written(&self, id: i64) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| matches!(c, CatalogCall::SetStockQuantity { id: written, .. } if *written == id))
    }
}

impl Default for MockCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCatalogStore for MockCatalogStore {
    async fn is_available(&self) -> bool {
        self.record(CatalogCall::IsAvailable);
        self.inner.is_available().await
    }

    async fn find_product_ids_by_sku(&self, sku: &str, limit: usize) -> Result<Vec<i64>> {
        self.record(CatalogCall::FindProductIdsBySku {
            sku: sku.to_string(),
            limit,
        });
        let fails = self.faults.lock().unwrap().failing_skus.contains(sku);
        if fails {
            return Err(anyhow!("mock sku lookup failure for {}", sku));
        }
        self.inner.find_product_ids_by_sku(sku, limit).await
    }

    async fn get_product(&self, id: i64) -> Result<Option<CatalogProduct>> {
        let (fails, panics, missing_after_write) = {
            let faults = self.faults.lock().unwrap();
            (
                faults.failing_ids.contains(&id),
                faults.panicking_ids.contains(&id),
                faults.missing_after_write.contains(&id),
            )
        };
        let hide = missing_after_write && self.was_written(id);
        self.record(CatalogCall::GetProduct(id));

        if panics {
            panic!("mock catalog panic loading product {}", id);
        }
        if fails {
            return Err(anyhow!("mock catalog failure loading product {}", id));
        }
        if hide {
            return Ok(None);
        }
        self.inner.get_product(id).await
    }

    async fn enable_stock_management(&self, id: i64) -> Result<()> {
        self.record(CatalogCall::EnableStockManagement(id));
        self.inner.enable_stock_management(id).await
    }

    async fn set_stock_quantity(&self, id: i64, qty: i64) -> Result<Option<i64>> {
        self.record(CatalogCall::SetStockQuantity { id, qty });
        let refused = self.faults.lock().unwrap().refused_writes.contains(&id);
        if refused {
            return Ok(None);
        }
        self.inner.set_stock_quantity(id, qty).await
    }

    async fn set_stock_status(&self, id: i64, status: StockStatus) -> Result<()> {
        self.record(CatalogCall::SetStockStatus { id, status });
        self.inner.set_stock_status(id, status).await
    }
}

// =============================================================================
// Spy Stock Logger
// =============================================================================

/// Records every logged event for assertions
#[derive(Default)]
pub struct SpyStockLogger {
    entries: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl SpyStockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all (message, context) pairs logged so far
    pub fn entries(&self) -> Vec<(String, serde_json::Value)> {
        self.entries.lock().unwrap().clone()
    }

    /// Contexts of every event logged with the given message
    pub fn contexts_for(&self, message: &str) -> Vec<serde_json::Value> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == message)
            .map(|(_, c)| c.clone())
            .collect()
    }
}

impl BaseStockLogger for SpyStockLogger {
    fn log(&self, message: &str, context: serde_json::Value) {
        self.entries
            .lock()
            .unwrap()
            .push((message.to_string(), context));
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub catalog: Arc<MockCatalogStore>,
    pub logger: Arc<SpyStockLogger>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(MockCatalogStore::new()),
            logger: Arc::new(SpyStockLogger::new()),
        }
    }

    /// Set a mock catalog
    pub fn mock_catalog(mut self, catalog: MockCatalogStore) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Convert into ServerDeps for testing
    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(self.catalog.clone(), self.logger.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
