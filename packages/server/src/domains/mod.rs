// Domain modules
pub mod stock;
