use axum::{
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::common::auth::{Actor, ApiKey, AuthError};
use crate::domains::stock::models::{BatchResponse, StockErrorCode};

/// API key authentication middleware
///
/// Extracts the key from the Authorization header, looks it up, and adds an
/// `Actor` to request extensions. If no key or an unknown key is sent, the
/// request continues without an `Actor`; handlers decide whether that is fatal.
pub async fn api_key_auth_middleware(
    api_keys: Arc<Vec<ApiKey>>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(actor) = extract_actor(&request, &api_keys) {
        debug!("Authenticated API client: {}", actor.label());
        request.extensions_mut().insert(actor);
    } else {
        debug!("No valid API key");
    }

    next.run(request).await
}

/// Extract and look up the API key from the request
fn extract_actor(
    request: &axum::http::Request<axum::body::Body>,
    api_keys: &[ApiKey],
) -> Option<Actor> {
    let token = bearer_token(request.headers())?;

    api_keys
        .iter()
        .find(|key| key.matches(token))
        .map(|key| Actor::new(key.label(), key.capabilities.clone()))
}

/// Token from the Authorization header (handles both "Bearer <token>" and raw token)
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    (!token.is_empty()).then_some(token)
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AuthError::AuthenticationRequired | AuthError::InvalidApiKey => {
                (StatusCode::UNAUTHORIZED, StockErrorCode::Unauthorized)
            }
            AuthError::PermissionDenied(_) => (StatusCode::FORBIDDEN, StockErrorCode::Forbidden),
        };

        let body = BatchResponse::request_failure(code, self.to_string());
        (status, Json(body)).into_response()
    }
}
