use serde::{Deserialize, Serialize};

/// Stable machine-readable codes reported in `ErrorEntry::code`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockErrorCode {
    // Request-level
    InvalidPayload,
    InvalidItems,
    EmptyItems,
    /// Kept under its historical wire name for existing clients
    #[serde(rename = "woocommerce_not_available")]
    CatalogNotAvailable,
    Unauthorized,
    Forbidden,

    // Item validation
    InvalidItem,
    InvalidMode,
    MissingQty,
    InvalidQty,
    MissingIdentifier,
    AmbiguousIdentifier,
    InvalidSku,
    InvalidProductId,

    // Item resolution
    SkuNotFound,
    AmbiguousSku,
    ProductNotFound,
    VariableParentSkuNotAllowed,
    VariableParentProductIdNotAllowed,

    // Item mutation
    StockUpdateFailed,

    InternalError,
}

impl StockErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockErrorCode::InvalidPayload => "invalid_payload",
            StockErrorCode::InvalidItems => "invalid_items",
            StockErrorCode::EmptyItems => "empty_items",
            StockErrorCode::CatalogNotAvailable => "woocommerce_not_available",
            StockErrorCode::Unauthorized => "unauthorized",
            StockErrorCode::Forbidden => "forbidden",
            StockErrorCode::InvalidItem => "invalid_item",
            StockErrorCode::InvalidMode => "invalid_mode",
            StockErrorCode::MissingQty => "missing_qty",
            StockErrorCode::InvalidQty => "invalid_qty",
            StockErrorCode::MissingIdentifier => "missing_identifier",
            StockErrorCode::AmbiguousIdentifier => "ambiguous_identifier",
            StockErrorCode::InvalidSku => "invalid_sku",
            StockErrorCode::InvalidProductId => "invalid_product_id",
            StockErrorCode::SkuNotFound => "sku_not_found",
            StockErrorCode::AmbiguousSku => "ambiguous_sku",
            StockErrorCode::ProductNotFound => "product_not_found",
            StockErrorCode::VariableParentSkuNotAllowed => "variable_parent_sku_not_allowed",
            StockErrorCode::VariableParentProductIdNotAllowed => {
                "variable_parent_product_id_not_allowed"
            }
            StockErrorCode::StockUpdateFailed => "stock_update_failed",
            StockErrorCode::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for StockErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
