use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Identifier, StockErrorCode};

/// Sanitized echo of a raw item, used in responses and logs.
///
/// Never used for decisions; unknown or malformed fields are simply omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Integer, trimmed string, or the raw value as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl NormalizedInput {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none() && self.sku.is_none() && self.qty.is_none() && self.mode.is_none()
    }
}

/// Outcome status of a successful item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Updated,
}

/// Supported stock operation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockMode {
    /// Absolute assignment of the quantity
    Set,
}

impl StockMode {
    pub const DEFAULT: &'static str = "set";
}

/// One successfully updated item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub index: usize,
    pub input: NormalizedInput,
    pub resolved_product_id: i64,
    pub status: ItemStatus,
    pub identifier: Identifier,
    pub mode: StockMode,
    /// `None` when the record tracked no quantity before the update
    pub old_stock: Option<i64>,
    pub new_stock: i64,
}

/// One failed item, or a request-level failure (index and identifier null)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub index: Option<usize>,
    pub identifier: Option<String>,
    pub code: StockErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<NormalizedInput>,
}

impl ErrorEntry {
    pub fn request_level(code: StockErrorCode, message: impl Into<String>) -> Self {
        Self {
            index: None,
            identifier: None,
            code,
            message: message.into(),
            input: None,
        }
    }

    pub fn item(
        index: usize,
        identifier: Option<String>,
        code: StockErrorCode,
        message: impl Into<String>,
        input: NormalizedInput,
    ) -> Self {
        Self {
            index: Some(index),
            identifier,
            code,
            message: message.into(),
            input: (!input.is_empty()).then_some(input),
        }
    }
}

/// Aggregate response for one batch.
///
/// `success` is derived from `errors` exactly once, at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    success: bool,
    results: Vec<ResultEntry>,
    errors: Vec<ErrorEntry>,
}

impl BatchResponse {
    /// Response for a failure that stopped the request before any item ran
    pub fn request_failure(code: StockErrorCode, message: impl Into<String>) -> Self {
        BatchAccumulator::default()
            .push_error(ErrorEntry::request_level(code, message))
            .finish()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }
}

/// Append-only collector for per-item outcomes
#[derive(Debug, Default)]
pub struct BatchAccumulator {
    results: Vec<ResultEntry>,
    errors: Vec<ErrorEntry>,
}

impl BatchAccumulator {
    pub fn push_result(&mut self, entry: ResultEntry) -> &mut Self {
        self.results.push(entry);
        self
    }

    pub fn push_error(&mut self, entry: ErrorEntry) -> &mut Self {
        self.errors.push(entry);
        self
    }

    pub fn finish(&mut self) -> BatchResponse {
        let results = std::mem::take(&mut self.results);
        let errors = std::mem::take(&mut self.errors);
        BatchResponse {
            success: errors.is_empty(),
            results,
            errors,
        }
    }
}
