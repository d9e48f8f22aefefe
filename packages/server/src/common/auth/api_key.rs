use anyhow::{bail, Result};
use std::str::FromStr;

use super::CatalogCapability;

/// A configured API key and the capabilities it grants.
///
/// Parsed from `token` or `token:cap1|cap2`. A bare token grants
/// `manage_catalog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub token: String,
    pub capabilities: Vec<CatalogCapability>,
}

impl ApiKey {
    pub fn new(token: impl Into<String>, capabilities: Vec<CatalogCapability>) -> Self {
        Self {
            token: token.into(),
            capabilities,
        }
    }

    /// Log-safe label that never exposes the full token
    pub fn label(&self) -> String {
        let prefix: String = self.token.chars().take(4).collect();
        format!("key_{}", prefix)
    }

    /// Whether `candidate` is this key's token, compared in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(&self.token, candidate)
    }
}

/// Constant-time string comparison
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}

impl FromStr for ApiKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (token, caps) = match s.split_once(':') {
            Some((token, caps)) => (token.trim(), Some(caps)),
            None => (s.trim(), None),
        };

        if token.is_empty() {
            bail!("API key token must not be empty");
        }

        let capabilities = match caps {
            Some(caps) => caps
                .split('|')
                .filter(|c| !c.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<_>>>()?,
            None => vec![CatalogCapability::ManageCatalog],
        };

        Ok(Self::new(token, capabilities))
    }
}
