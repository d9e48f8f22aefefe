//! Stock mutator: write an absolute quantity to a resolved record.

use tracing::warn;

use crate::domains::stock::models::{CatalogProduct, MutationError, StockStatus};
use crate::kernel::BaseCatalogStore;

/// Quantities observed around one write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockChange {
    /// Quantity before the write; `None` if the record tracked none
    pub old_stock: Option<i64>,
    /// Authoritative quantity after the write
    pub new_stock: i64,
}

/// Set `product`'s stock to `qty`.
///
/// Enables stock management first when needed, derives the availability
/// status from `qty`, and re-reads the record for the stored value. If the
/// re-read yields nothing, the requested quantity is reported.
pub async fn apply_stock(
    product: &CatalogProduct,
    qty: i64,
    catalog: &dyn BaseCatalogStore,
) -> Result<StockChange, MutationError> {
    let old_stock = product.stock_quantity;

    if !product.manage_stock {
        catalog.enable_stock_management(product.id).await?;
    }

    if catalog.set_stock_quantity(product.id, qty).await?.is_none() {
        return Err(MutationError::StockUpdateFailed);
    }

    catalog
        .set_stock_status(product.id, StockStatus::for_quantity(qty))
        .await?;

    let new_stock = match catalog.get_product(product.id).await {
        Ok(Some(refreshed)) => refreshed.stock_quantity.unwrap_or(qty),
        Ok(None) => qty,
        Err(e) => {
            warn!(product_id = product.id, error = %e, "Re-read after stock write failed");
            qty
        }
    };

    Ok(StockChange {
        old_stock,
        new_stock,
    })
}
