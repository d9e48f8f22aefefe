pub mod apply_stock;
pub mod normalize;
pub mod process_batch;
pub mod resolve_product;

pub use apply_stock::{apply_stock, StockChange};
pub use normalize::{identifier_label, normalize_input, validate_item, ValidatedIntent};
pub use process_batch::BatchProcessor;
pub use resolve_product::{resolve_by_id, resolve_by_sku, resolve_product};
