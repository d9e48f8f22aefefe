/// Authorization module for Stock Control
///
/// Provides a fluent API for authorization checks in route handlers:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, CatalogCapability};
///
/// actor
///     .can(CatalogCapability::ManageCatalog)
///     .or(CatalogCapability::ManageOptions)
///     .check()?;
/// ```
///
/// Authentication (API key lookup) happens in the server middleware; this
/// module only answers "may this actor do that".

mod api_key;
mod builder;
mod capability;
mod errors;

pub use api_key::ApiKey;
pub use builder::{Actor, CapabilityBuilder};
pub use capability::CatalogCapability;
pub use errors::AuthError;
