// Common types and utilities shared across the application

pub mod auth;
pub mod utils;

pub use auth::{Actor, ApiKey, AuthError, CatalogCapability};
