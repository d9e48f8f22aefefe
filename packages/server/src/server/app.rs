//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::common::auth::ApiKey;
use crate::config::{CatalogBackend, Config};
use crate::domains::stock::BatchProcessor;
use crate::kernel::{
    BaseCatalogStore, InMemoryCatalog, PostgresCatalog, ServerDeps, TracingStockLogger,
};
use crate::server::middleware::api_key_auth_middleware;
use crate::server::routes::{health_handler, stock_handler, STOCK_ROUTE};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<BatchProcessor>,
    pub deps: ServerDeps,
}

impl AppState {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            processor: Arc::new(BatchProcessor::new(deps.clone())),
            deps,
        }
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, api_keys: Vec<ApiKey>) -> Router {
    let app_state = AppState::new(deps);
    let api_keys = Arc::new(api_keys);

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route(STOCK_ROUTE, post(stock_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            api_key_auth_middleware(api_keys.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the catalog store and logger selected by `config`
pub async fn build_deps(config: &Config) -> Result<ServerDeps> {
    let catalog: Arc<dyn BaseCatalogStore> = match config.catalog_backend {
        CatalogBackend::Memory => {
            let catalog = match &config.catalog_seed_path {
                Some(path) => InMemoryCatalog::from_seed_file(path)?,
                None => InMemoryCatalog::new(),
            };
            tracing::info!(products = catalog.len().await, "Using in-memory catalog");
            Arc::new(catalog)
        }
        CatalogBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when CATALOG_BACKEND=postgres")?;

            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations complete");

            Arc::new(PostgresCatalog::new(pool))
        }
    };

    Ok(ServerDeps::new(catalog, Arc::new(TracingStockLogger)))
}
