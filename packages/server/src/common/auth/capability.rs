use std::fmt;
use std::str::FromStr;

/// Capabilities an API client can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogCapability {
    /// Manage the product catalog, including stock levels
    ManageCatalog,

    /// Full site administration
    ManageOptions,
}

impl fmt::Display for CatalogCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogCapability::ManageCatalog => write!(f, "manage_catalog"),
            CatalogCapability::ManageOptions => write!(f, "manage_options"),
        }
    }
}

impl FromStr for CatalogCapability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim() {
            "manage_catalog" => Ok(CatalogCapability::ManageCatalog),
            "manage_options" => Ok(CatalogCapability::ManageOptions),
            other => Err(anyhow::anyhow!("Invalid capability: {}", other)),
        }
    }
}
