// Stock Control - API Core
//
// This crate provides the batch stock update endpoint for a product catalog.
// Architecture follows domain-driven design: collaborators live behind traits
// in kernel/, decision logic lives in domains/stock/activities/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
