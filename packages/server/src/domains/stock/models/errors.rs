//! Typed failures for each stage of an item's pipeline.
//!
//! The `Display` text of each variant is the human-readable message reported
//! to the caller; `code()` is the stable machine-readable code.

use thiserror::Error;

use super::StockErrorCode;

/// Failures detected from the raw item alone, before touching the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Each item must be an object.")]
    InvalidItem,

    #[error("Only \"set\" mode is supported.")]
    InvalidMode,

    #[error("qty is required.")]
    MissingQty,

    #[error("qty must be an integer greater than or equal to 0.")]
    InvalidQty,

    #[error("Provide either sku or product_id.")]
    MissingIdentifier,

    #[error("Provide only one identifier: sku or product_id.")]
    AmbiguousIdentifier,

    #[error("sku must be a non-empty string.")]
    InvalidSku,

    #[error("product_id must be a positive integer.")]
    InvalidProductId,
}

impl ValidationError {
    pub fn code(&self) -> StockErrorCode {
        match self {
            ValidationError::InvalidItem => StockErrorCode::InvalidItem,
            ValidationError::InvalidMode => StockErrorCode::InvalidMode,
            ValidationError::MissingQty => StockErrorCode::MissingQty,
            ValidationError::InvalidQty => StockErrorCode::InvalidQty,
            ValidationError::MissingIdentifier => StockErrorCode::MissingIdentifier,
            ValidationError::AmbiguousIdentifier => StockErrorCode::AmbiguousIdentifier,
            ValidationError::InvalidSku => StockErrorCode::InvalidSku,
            ValidationError::InvalidProductId => StockErrorCode::InvalidProductId,
        }
    }
}

/// Failures mapping an identifier to exactly one sellable catalog record
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("No product or variation found for the provided SKU.")]
    SkuNotFound,

    #[error("Provided SKU is ambiguous and matches multiple products. Use product_id instead.")]
    AmbiguousSku,

    #[error("Product not found for the provided SKU.")]
    SkuProductMissing,

    #[error("Parent variable product SKU is not allowed. Update a specific variation SKU instead.")]
    VariableParentSku,

    #[error("No product or variation found for the provided product_id.")]
    ProductNotFound,

    #[error("Parent variable product ID is not allowed. Update a specific variation ID instead.")]
    VariableParentProductId,

    /// The catalog store itself failed
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ResolutionError {
    pub fn code(&self) -> StockErrorCode {
        match self {
            ResolutionError::SkuNotFound => StockErrorCode::SkuNotFound,
            ResolutionError::AmbiguousSku => StockErrorCode::AmbiguousSku,
            ResolutionError::SkuProductMissing | ResolutionError::ProductNotFound => {
                StockErrorCode::ProductNotFound
            }
            ResolutionError::VariableParentSku => StockErrorCode::VariableParentSkuNotAllowed,
            ResolutionError::VariableParentProductId => {
                StockErrorCode::VariableParentProductIdNotAllowed
            }
            ResolutionError::Store(_) => StockErrorCode::InternalError,
        }
    }
}

/// Failures writing the new quantity
#[derive(Error, Debug)]
pub enum MutationError {
    #[error("Stock update failed for this product.")]
    StockUpdateFailed,

    /// The catalog store itself failed
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl MutationError {
    pub fn code(&self) -> StockErrorCode {
        match self {
            MutationError::StockUpdateFailed => StockErrorCode::StockUpdateFailed,
            MutationError::Store(_) => StockErrorCode::InternalError,
        }
    }
}

/// Any reason a single item did not produce a result
#[derive(Error, Debug)]
pub enum ItemError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    /// Unexpected fault (store error or panic) caught at the item boundary
    #[error("{0}")]
    Fault(String),
}

impl ItemError {
    pub fn code(&self) -> StockErrorCode {
        match self {
            ItemError::Validation(e) => e.code(),
            ItemError::Resolution(e) => e.code(),
            ItemError::Mutation(e) => e.code(),
            ItemError::Fault(_) => StockErrorCode::InternalError,
        }
    }

    /// Underlying detail of an unexpected fault, for logs only
    pub fn fault_detail(&self) -> Option<String> {
        match self {
            ItemError::Resolution(ResolutionError::Store(e))
            | ItemError::Mutation(MutationError::Store(e)) => Some(format!("{:#}", e)),
            ItemError::Fault(detail) => Some(detail.clone()),
            _ => None,
        }
    }

    fn is_fault(&self) -> bool {
        self.code() == StockErrorCode::InternalError
    }

    /// Message reported to the caller. Fault details stay in the logs.
    pub fn public_message(&self) -> String {
        if self.is_fault() {
            "Unexpected error while processing this item.".to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_faults() {
        let err: ItemError = ResolutionError::Store(anyhow::anyhow!("connection reset")).into();
        assert!(err.is_fault());
        assert_eq!(err.fault_detail().as_deref(), Some("connection reset"));
        assert_eq!(err.code(), StockErrorCode::InternalError);
        assert_eq!(
            err.public_message(),
            "Unexpected error while processing this item."
        );
    }

    #[test]
    fn test_expected_failures_keep_their_message() {
        let err: ItemError = ResolutionError::AmbiguousSku.into();
        assert!(!err.is_fault());
        assert_eq!(err.fault_detail(), None);
        assert_eq!(err.code(), StockErrorCode::AmbiguousSku);
        assert!(err.public_message().starts_with("Provided SKU is ambiguous"));
    }

    #[test]
    fn test_sku_and_id_lookups_share_not_found_code() {
        assert_eq!(
            ResolutionError::SkuProductMissing.code(),
            ResolutionError::ProductNotFound.code()
        );
    }
}
