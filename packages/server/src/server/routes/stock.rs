//! `POST /stock-control/v1/stock`
//!
//! Accepts either a single item's fields as the body, or
//! `{"items": [...], "mode": "set"}`. Structural problems with the body are
//! request-level 400s; everything else is reported per item in the body.

use axum::{
    body::Bytes,
    extract::{Extension, OriginalUri},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::FutureExt;
use serde_json::{json, Value};
use std::panic::AssertUnwindSafe;
use thiserror::Error;

use crate::common::auth::{Actor, AuthError, CatalogCapability};
use crate::common::utils::{sanitize_text, scalar_text};
use crate::domains::stock::activities::process_batch::panic_message;
use crate::domains::stock::models::{BatchResponse, StockErrorCode, StockMode};
use crate::server::app::AppState;
use crate::server::middleware::bearer_token;

pub const STOCK_ROUTE: &str = "/stock-control/v1/stock";

/// Request body shape failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Request body must be a JSON object.")]
    InvalidPayload,

    #[error("items must be an array.")]
    InvalidItems,

    #[error("At least one stock update item is required.")]
    EmptyItems,
}

impl PayloadError {
    pub fn code(&self) -> StockErrorCode {
        match self {
            PayloadError::InvalidPayload => StockErrorCode::InvalidPayload,
            PayloadError::InvalidItems => StockErrorCode::InvalidItems,
            PayloadError::EmptyItems => StockErrorCode::EmptyItems,
        }
    }
}

/// Pull the item list out of a decoded body.
///
/// A body without a non-null `items` key is itself the single item.
pub fn extract_items(payload: Option<&Value>) -> Result<Vec<Value>, PayloadError> {
    let payload = payload
        .filter(|p| p.is_object())
        .ok_or(PayloadError::InvalidPayload)?;

    let items = match payload.get("items") {
        None | Some(Value::Null) => vec![payload.clone()],
        Some(Value::Array(items)) => items.clone(),
        Some(_) => return Err(PayloadError::InvalidItems),
    };

    if items.is_empty() {
        return Err(PayloadError::EmptyItems);
    }

    Ok(items)
}

/// Batch-wide default mode: the body's `mode`, normalized, else "set"
pub fn payload_mode(payload: &Value) -> String {
    match payload.get("mode") {
        None | Some(Value::Null) => StockMode::DEFAULT.to_string(),
        Some(value) => scalar_text(value)
            .map(|text| sanitize_text(&text).to_lowercase())
            .unwrap_or_default(),
    }
}

/// Stock update endpoint
///
/// Returns 200 when every item succeeded, 207 when at least one item failed,
/// and 400 for a malformed body. A panic while handling the body is reported
/// as a single `internal_error` with 200.
pub async fn stock_handler(
    Extension(state): Extension<AppState>,
    actor: Option<Extension<Actor>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let actor = match authorize(actor.map(|Extension(a)| a), &headers) {
        Ok(actor) => actor,
        Err(e) => {
            state.deps.logger.log(
                "Stock request summary",
                json!({
                    "client": null,
                    "method": method.as_str(),
                    "route": uri.path(),
                    "items": 0,
                    "result_count": 0,
                    "error_count": 1,
                    "success": false,
                    "auth_error": e.code(),
                }),
            );
            return e.into_response();
        }
    };

    let outcome = AssertUnwindSafe(handle_body(&state, &body))
        .catch_unwind()
        .await;

    let (status, response, item_count) = match outcome {
        Ok(handled) => handled,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            state
                .deps
                .logger
                .log("Unhandled request exception", json!({ "message": message }));
            (
                StatusCode::OK,
                BatchResponse::request_failure(
                    StockErrorCode::InternalError,
                    "Unexpected server error while processing the request.",
                ),
                0,
            )
        }
    };

    state.deps.logger.log(
        "Stock request summary",
        json!({
            "client": actor.label(),
            "method": method.as_str(),
            "route": uri.path(),
            "items": item_count,
            "result_count": response.results().len(),
            "error_count": response.errors().len(),
            "success": response.errors().is_empty(),
        }),
    );

    (status, Json(response)).into_response()
}

fn authorize(actor: Option<Actor>, headers: &HeaderMap) -> Result<Actor, AuthError> {
    let actor = match actor {
        Some(actor) => actor,
        None if bearer_token(headers).is_some() => return Err(AuthError::InvalidApiKey),
        None => return Err(AuthError::AuthenticationRequired),
    };

    actor
        .can(CatalogCapability::ManageCatalog)
        .or(CatalogCapability::ManageOptions)
        .check()?;

    Ok(actor)
}

async fn handle_body(state: &AppState, body: &[u8]) -> (StatusCode, BatchResponse, usize) {
    let payload: Option<Value> = serde_json::from_slice(body).ok();

    let items = match extract_items(payload.as_ref()) {
        Ok(items) => items,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                BatchResponse::request_failure(e.code(), e.to_string()),
                0,
            )
        }
    };

    let mode = payload
        .as_ref()
        .map(payload_mode)
        .unwrap_or_else(|| StockMode::DEFAULT.to_string());

    let response = state.processor.process(&items, &mode).await;
    let status = if response.success() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    (status, response, items.len())
}
