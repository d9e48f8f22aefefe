pub mod activities;
pub mod models;

// Re-export commonly used types
pub use activities::BatchProcessor;
pub use models::{BatchResponse, ErrorEntry, ResultEntry, StockErrorCode};
