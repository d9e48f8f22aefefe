use super::{AuthError, CatalogCapability};

/// Entry point for authorization checks
///
/// Usage:
/// ```rust,ignore
/// Actor::new("key_abcd", capabilities)
///     .can(CatalogCapability::ManageCatalog)
///     .check()?;
/// ```
#[derive(Debug, Clone)]
pub struct Actor {
    label: String,
    capabilities: Vec<CatalogCapability>,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `label` - Log-safe name of the authenticated client
    /// * `capabilities` - Capabilities granted during authentication
    pub fn new(label: impl Into<String>, capabilities: Vec<CatalogCapability>) -> Self {
        Self {
            label: label.into(),
            capabilities,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Specify what capability the actor needs
    pub fn can(&self, capability: CatalogCapability) -> CapabilityBuilder<'_> {
        CapabilityBuilder {
            actor: self,
            accepted: vec![capability],
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder<'a> {
    actor: &'a Actor,
    accepted: Vec<CatalogCapability>,
}

impl CapabilityBuilder<'_> {
    /// Accept an alternative capability
    pub fn or(mut self, capability: CatalogCapability) -> Self {
        self.accepted.push(capability);
        self
    }

    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        if self
            .accepted
            .iter()
            .any(|c| self.actor.capabilities.contains(c))
        {
            return Ok(());
        }

        let wanted = self
            .accepted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(AuthError::PermissionDenied(format!("requires {}", wanted)))
    }
}
