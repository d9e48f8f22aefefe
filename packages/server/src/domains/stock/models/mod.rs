pub mod error_code;
pub mod errors;
pub mod identifier;
pub mod product;
pub mod response;

pub use error_code::StockErrorCode;
pub use errors::{ItemError, MutationError, ResolutionError, ValidationError};
pub use identifier::Identifier;
pub use product::{CatalogProduct, ProductContext, ProductKind, StockStatus};
pub use response::{
    BatchAccumulator, BatchResponse, ErrorEntry, ItemStatus, NormalizedInput, ResultEntry,
    StockMode,
};
