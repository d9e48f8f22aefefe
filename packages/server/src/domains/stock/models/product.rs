use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Identifier;

/// Catalog record kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Standalone sellable product
    Simple,
    /// Parent grouping record; has no stock of its own
    Variable,
    /// Sellable child of a variable product
    Variation,
}

impl ProductKind {
    /// Parent records group variations and must never be stock-mutated directly
    pub fn is_parent(&self) -> bool {
        matches!(self, ProductKind::Variable)
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductKind::Simple => write!(f, "simple"),
            ProductKind::Variable => write!(f, "variable"),
            ProductKind::Variation => write!(f, "variation"),
        }
    }
}

impl FromStr for ProductKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "simple" => Ok(ProductKind::Simple),
            "variable" => Ok(ProductKind::Variable),
            "variation" => Ok(ProductKind::Variation),
            _ => Err(anyhow::anyhow!("Invalid product kind: {}", s)),
        }
    }
}

/// Availability status derived from the stock quantity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    InStock,
    #[default]
    OutOfStock,
}

impl StockStatus {
    pub fn for_quantity(qty: i64) -> Self {
        if qty > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "instock"),
            StockStatus::OutOfStock => write!(f, "outofstock"),
        }
    }
}

impl FromStr for StockStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "instock" => Ok(StockStatus::InStock),
            "outofstock" => Ok(StockStatus::OutOfStock),
            _ => Err(anyhow::anyhow!("Invalid stock status: {}", s)),
        }
    }
}

/// A catalog record as seen by the stock endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogProduct {
    pub id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    pub kind: ProductKind,
    #[serde(default)]
    pub manage_stock: bool,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: StockStatus,
}

impl CatalogProduct {
    pub fn simple(id: i64, sku: Option<&str>) -> Self {
        Self {
            id,
            sku: sku.map(str::to_string),
            kind: ProductKind::Simple,
            manage_stock: false,
            stock_quantity: None,
            stock_status: StockStatus::OutOfStock,
        }
    }

    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as stock-managed with the given quantity and matching status
    pub fn with_stock(mut self, qty: i64) -> Self {
        self.manage_stock = true;
        self.stock_quantity = Some(qty);
        self.stock_status = StockStatus::for_quantity(qty);
        self
    }
}

/// A resolved catalog record, valid for the current request only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductContext {
    pub product: CatalogProduct,
    pub identifier: Identifier,
}

impl ProductContext {
    pub fn product_id(&self) -> i64 {
        self.product.id
    }
}
