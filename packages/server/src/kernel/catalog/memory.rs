//! In-process catalog store.
//!
//! Used by the development server (optionally seeded from a JSON file) and by
//! tests. Record semantics mirror the Postgres backend: a write is refused
//! unless the record is stock-managed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domains::stock::models::{CatalogProduct, StockStatus};
use crate::kernel::BaseCatalogStore;

/// Thread-safe, cloneable in-memory catalog keyed by product id.
#[derive(Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<BTreeMap<i64, CatalogProduct>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Create a catalog holding the given records
    pub fn with_products(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        let map = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: Arc::new(RwLock::new(map)),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Load records from a JSON array file
    pub fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog seed file {}", path.display()))?;
        let products: Vec<CatalogProduct> =
            serde_json::from_str(&raw).context("Failed to parse catalog seed file")?;
        Ok(Self::with_products(products))
    }

    /// Insert or replace a record
    pub async fn insert(&self, product: CatalogProduct) {
        self.products.write().await.insert(product.id, product);
    }

    /// Simulate the catalog going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCatalogStore for InMemoryCatalog {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn find_product_ids_by_sku(&self, sku: &str, limit: usize) -> Result<Vec<i64>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.id > 0 && p.sku.as_deref() == Some(sku))
            .map(|p| p.id)
            .take(limit)
            .collect())
    }

    async fn get_product(&self, id: i64) -> Result<Option<CatalogProduct>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn enable_stock_management(&self, id: i64) -> Result<()> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .with_context(|| format!("Product {} vanished before stock management", id))?;
        product.manage_stock = true;
        Ok(())
    }

    async fn set_stock_quantity(&self, id: i64, qty: i64) -> Result<Option<i64>> {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) if product.manage_stock => {
                product.stock_quantity = Some(qty);
                Ok(Some(qty))
            }
            _ => Ok(None),
        }
    }

    async fn set_stock_status(&self, id: i64, status: StockStatus) -> Result<()> {
        let mut products = self.products.write().await;
        if let Some(product) = products.get_mut(&id) {
            product.stock_status = status;
        }
        Ok(())
    }
}
