//! Server dependencies (using traits for testability)
//!
//! Built once at startup and handed to the router; there is no global state.

use std::sync::Arc;

use crate::kernel::{BaseCatalogStore, BaseStockLogger};

/// Dependencies accessible to stock activities and route handlers
#[derive(Clone)]
pub struct ServerDeps {
    pub catalog: Arc<dyn BaseCatalogStore>,
    pub logger: Arc<dyn BaseStockLogger>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(catalog: Arc<dyn BaseCatalogStore>, logger: Arc<dyn BaseStockLogger>) -> Self {
        Self { catalog, logger }
    }
}
