//! Kernel module - server infrastructure and dependencies.

pub mod catalog;
pub mod deps;
pub mod stock_logger;
pub mod test_dependencies;
pub mod traits;

/// How many SKU matches to fetch: enough to tell none / one / many apart.
pub const SKU_LOOKAHEAD: usize = 3;

pub use catalog::{InMemoryCatalog, PostgresCatalog};
pub use deps::ServerDeps;
pub use stock_logger::TracingStockLogger;
pub use test_dependencies::TestDependencies;
pub use traits::*;
