// HTTP routes
pub mod health;
pub mod stock;

pub use health::*;
pub use stock::*;
