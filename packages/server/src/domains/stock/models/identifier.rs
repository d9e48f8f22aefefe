use serde::{Deserialize, Serialize};
use std::fmt;

/// How an item names its target record.
///
/// Serialized as `{"type": "sku", "value": "AA-1"}` or
/// `{"type": "product_id", "value": 42}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Identifier {
    Sku(String),
    ProductId(i64),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Sku(sku) => write!(f, "sku:{}", sku),
            Identifier::ProductId(id) => write!(f, "product_id:{}", id),
        }
    }
}
