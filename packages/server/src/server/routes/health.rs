use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    catalog: CatalogHealth,
}

#[derive(Serialize)]
pub struct CatalogHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Returns 200 OK if the catalog answers within 5s, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let catalog = match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        state.deps.catalog.is_available(),
    )
    .await
    {
        Ok(true) => CatalogHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(false) => CatalogHealth {
            status: "error".to_string(),
            error: Some("Catalog unavailable".to_string()),
        },
        Err(_) => CatalogHealth {
            status: "error".to_string(),
            error: Some("Catalog check timeout (>5s)".to_string()),
        },
    };

    let is_healthy = catalog.status == "ok";
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            catalog,
        }),
    )
}
