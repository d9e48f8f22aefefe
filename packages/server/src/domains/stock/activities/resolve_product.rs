//! Identifier -> exactly one sellable catalog record.
//!
//! Resolution is strict: duplicate SKUs and parent records are user errors,
//! never resolved by picking one.

use tracing::debug;

use crate::domains::stock::models::{Identifier, ProductContext, ResolutionError};
use crate::kernel::{BaseCatalogStore, SKU_LOOKAHEAD};

/// Resolve a validated identifier against the catalog
pub async fn resolve_product(
    identifier: &Identifier,
    catalog: &dyn BaseCatalogStore,
) -> Result<ProductContext, ResolutionError> {
    match identifier {
        Identifier::Sku(sku) => resolve_by_sku(sku, catalog).await,
        Identifier::ProductId(id) => resolve_by_id(*id, catalog).await,
    }
}

/// Resolve by exact, case-sensitive SKU match
pub async fn resolve_by_sku(
    sku: &str,
    catalog: &dyn BaseCatalogStore,
) -> Result<ProductContext, ResolutionError> {
    let mut ids = catalog.find_product_ids_by_sku(sku, SKU_LOOKAHEAD).await?;
    ids.retain(|id| *id > 0);
    ids.sort_unstable();
    ids.dedup();

    let id = match ids.as_slice() {
        [] => return Err(ResolutionError::SkuNotFound),
        [id] => *id,
        _ => {
            debug!(sku = %sku, matches = ids.len(), "SKU matches multiple products");
            return Err(ResolutionError::AmbiguousSku);
        }
    };

    let product = catalog
        .get_product(id)
        .await?
        .ok_or(ResolutionError::SkuProductMissing)?;

    if product.kind.is_parent() {
        return Err(ResolutionError::VariableParentSku);
    }

    Ok(ProductContext {
        product,
        identifier: Identifier::Sku(sku.to_string()),
    })
}

/// Resolve by catalog id
pub async fn resolve_by_id(
    id: i64,
    catalog: &dyn BaseCatalogStore,
) -> Result<ProductContext, ResolutionError> {
    let product = catalog
        .get_product(id)
        .await?
        .ok_or(ResolutionError::ProductNotFound)?;

    if product.kind.is_parent() {
        return Err(ResolutionError::VariableParentProductId);
    }

    Ok(ProductContext {
        product,
        identifier: Identifier::ProductId(id),
    })
}
