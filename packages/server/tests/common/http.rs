//! In-process HTTP client for the router.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so no socket is bound.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use stock_control::kernel::test_dependencies::MockCatalogStore;
use stock_control::kernel::TestDependencies;
use stock_control::server::build_app;
use tower::ServiceExt;

use super::{sample_catalog, test_api_keys};

/// Router wired to mock collaborators, with handles kept for assertions
pub struct TestApp {
    pub deps: TestDependencies,
    router: Router,
}

/// Decoded response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn error_codes(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["code"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TestApp {
    /// App over the sample catalog
    pub fn new() -> Self {
        Self::with_catalog(MockCatalogStore::with_products(sample_catalog()))
    }

    pub fn with_catalog(catalog: MockCatalogStore) -> Self {
        let deps = TestDependencies::new().mock_catalog(catalog);
        let router = build_app(deps.deps(), test_api_keys());
        Self { deps, router }
    }

    /// POST a raw body to the stock route
    pub async fn post_raw(&self, token: Option<&str>, body: impl Into<Body>) -> TestResponse {
        let mut request = Request::builder()
            .method("POST")
            .uri("/stock-control/v1/stock")
            .header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {}", token));
        }
        self.send(request.body(body.into()).expect("valid request"))
            .await
    }

    pub async fn post_json(&self, token: Option<&str>, body: &Value) -> TestResponse {
        self.post_raw(token, body.to_string()).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }
}
