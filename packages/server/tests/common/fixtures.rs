//! Catalog fixtures shared by the endpoint and Postgres tests.

use stock_control::domains::stock::models::{CatalogProduct, ProductKind};

/// Token accepted by `test_api_keys` with `manage_catalog`
pub const MANAGER_TOKEN: &str = "manager-token";
/// Token accepted by `test_api_keys` with `manage_options`
pub const ADMIN_TOKEN: &str = "admin-token";
/// Token accepted by `test_api_keys` with no capabilities
pub const READER_TOKEN: &str = "reader-token";

pub fn test_api_keys() -> Vec<stock_control::common::ApiKey> {
    stock_control::parse_api_keys(&format!(
        "{},{}:manage_options,{}:",
        MANAGER_TOKEN, ADMIN_TOKEN, READER_TOKEN
    ))
    .expect("test api keys are valid")
}

/// A small catalog covering leaf, parent, and duplicate-SKU records
///
/// - 1: simple, sku `ONE`, managed, qty 9
/// - 42: simple, no sku, managed, qty 10
/// - 50: variation, sku `AA-1`, not stock-managed
/// - 60: variable parent, sku `PARENT`
/// - 70, 71: simple, both sku `DUP`
pub fn sample_catalog() -> Vec<CatalogProduct> {
    vec![
        CatalogProduct::simple(1, Some("ONE")).with_stock(9),
        CatalogProduct::simple(42, None).with_stock(10),
        CatalogProduct::simple(50, Some("AA-1")).with_kind(ProductKind::Variation),
        CatalogProduct::simple(60, Some("PARENT")).with_kind(ProductKind::Variable),
        CatalogProduct::simple(70, Some("DUP")).with_stock(1),
        CatalogProduct::simple(71, Some("DUP")).with_stock(2),
    ]
}
