//! Item normalizer: raw JSON item -> validated intent, without the catalog.
//!
//! Validation short-circuits in a fixed order: shape, mode, quantity,
//! identifier. The first failure is final for the item.

use serde_json::{Map, Value};

use crate::common::utils::{absint, is_present, sanitize_text, scalar_text, trim_ascii_blanks};
use crate::domains::stock::models::{Identifier, NormalizedInput, StockMode, ValidationError};

/// A well-formed request to set one record's stock.
///
/// The identifier is not yet resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIntent {
    pub mode: StockMode,
    pub qty: i64,
    pub identifier: Identifier,
}

/// Sanitized echo of a raw item. Never fails; malformed fields are omitted.
pub fn normalize_input(raw: &Value) -> NormalizedInput {
    let Some(item) = raw.as_object() else {
        return NormalizedInput::default();
    };

    let mut normalized = NormalizedInput::default();

    if let Some(value) = item.get("product_id").filter(|v| is_scalar_present(v)) {
        normalized.product_id = Some(absint(value));
    }

    if let Some(text) = item
        .get("sku")
        .filter(|v| is_scalar_present(v))
        .and_then(scalar_text)
    {
        normalized.sku = Some(sanitize_text(&text));
    }

    if let Some(value) = item.get("qty") {
        normalized.qty = Some(match value {
            Value::String(s) => Value::String(trim_ascii_blanks(s).to_string()),
            other => other.clone(),
        });
    }

    if let Some(text) = item
        .get("mode")
        .filter(|v| is_scalar_present(v))
        .and_then(scalar_text)
    {
        normalized.mode = Some(sanitize_text(&text).to_lowercase());
    }

    normalized
}

/// Best-effort `sku:<value>` / `product_id:<value>` label for diagnostics.
///
/// Prefers the SKU when both are supplied.
pub fn identifier_label(raw: &Value) -> Option<String> {
    let item = raw.as_object()?;

    if let Some(text) = item
        .get("sku")
        .filter(|v| is_scalar_present(v))
        .and_then(scalar_text)
    {
        return Some(format!("sku:{}", sanitize_text(&text)));
    }

    if let Some(id) = item.get("product_id").filter(|v| is_present(Some(v))) {
        return Some(format!("product_id:{}", absint(id)));
    }

    None
}

/// Validate one raw item.
///
/// `default_mode` applies when the item carries no `mode` of its own and is
/// compared as given; callers normalize it beforehand.
pub fn validate_item(raw: &Value, default_mode: &str) -> Result<ValidatedIntent, ValidationError> {
    let item = raw.as_object().ok_or(ValidationError::InvalidItem)?;

    let mode = resolve_mode(item, default_mode)?;
    let qty = resolve_qty(item)?;
    let identifier = resolve_identifier(item)?;

    Ok(ValidatedIntent {
        mode,
        qty,
        identifier,
    })
}

fn resolve_mode(item: &Map<String, Value>, default_mode: &str) -> Result<StockMode, ValidationError> {
    let mode = match item.get("mode") {
        None | Some(Value::Null) => default_mode.to_string(),
        Some(value) => scalar_text(value)
            .map(|text| sanitize_text(&text).to_lowercase())
            .ok_or(ValidationError::InvalidMode)?,
    };

    match mode.as_str() {
        StockMode::DEFAULT => Ok(StockMode::Set),
        _ => Err(ValidationError::InvalidMode),
    }
}

fn resolve_qty(item: &Map<String, Value>) -> Result<i64, ValidationError> {
    let raw = item.get("qty").ok_or(ValidationError::MissingQty)?;

    let qty = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let trimmed = trim_ascii_blanks(s);
            if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                trimmed.parse::<i64>().ok()
            } else {
                None
            }
        }
        _ => None,
    };

    match qty {
        Some(qty) if qty >= 0 => Ok(qty),
        _ => Err(ValidationError::InvalidQty),
    }
}

fn resolve_identifier(item: &Map<String, Value>) -> Result<Identifier, ValidationError> {
    let sku = item.get("sku");
    let product_id = item.get("product_id");

    match (is_present(sku), is_present(product_id)) {
        (false, false) => Err(ValidationError::MissingIdentifier),
        (true, true) => Err(ValidationError::AmbiguousIdentifier),
        (true, false) => {
            let sku = sku
                .and_then(scalar_text)
                .map(|text| sanitize_text(&text))
                .filter(|text| !text.is_empty())
                .ok_or(ValidationError::InvalidSku)?;
            Ok(Identifier::Sku(sku))
        }
        (false, true) => {
            let id = product_id
                .filter(|v| !v.is_array() && !v.is_object())
                .map(absint)
                .unwrap_or(0);
            if id <= 0 {
                return Err(ValidationError::InvalidProductId);
            }
            Ok(Identifier::ProductId(id))
        }
    }
}

fn is_scalar_present(value: &Value) -> bool {
    !value.is_array() && !value.is_object() && is_present(Some(value))
}
