//! Common test utilities for API testing.
//!
//! This module provides a test fixture that builds the router in-process
//! around a real watermark service, so requests run without binding a port.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use watermark_core::{
    testing::MockWatermarker, Config, InMemoryTicketStore, ServerConfig, TicketStore,
    WatermarkService, Watermarker,
};

/// Re-export fixtures for test convenience
pub use watermark_core::testing::fixtures;

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_watermark_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/watermark/create", json!({
///         "title": "Earth",
///         "author": { "firstName": "Ikaro", "lastName": "EStinmpoutsm" }
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// The service behind the router, for draining between steps
    pub service: Arc<WatermarkService>,
    /// Set when the fixture was built with a mock watermarker
    pub watermarker: Option<Arc<MockWatermarker>>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture backed by the default configuration.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a fixture from a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let service = Arc::new(WatermarkService::from_config(&config));
        Self::build(config, service, None)
    }

    /// Create a fixture whose watermarking is done by a mock.
    pub fn with_mock(config: Config) -> Self {
        let store: Arc<dyn TicketStore> =
            Arc::new(InMemoryTicketStore::new(config.store.clone()));
        let watermarker = Arc::new(MockWatermarker::new());
        let service = Arc::new(WatermarkService::new(
            store,
            Arc::clone(&watermarker) as Arc<dyn Watermarker>,
            config.processor.clone(),
        ));
        Self::build(config, service, Some(watermarker))
    }

    fn build(
        config: Config,
        service: Arc<WatermarkService>,
        watermarker: Option<Arc<MockWatermarker>>,
    ) -> Self {
        let state = Arc::new(watermark_server::state::AppState::new(
            config,
            Arc::clone(&service),
        ));
        let router = watermark_server::api::create_router(state);

        Self {
            router,
            service,
            watermarker,
        }
    }

    /// Wait until every submitted document has been processed.
    pub async fn drain(&self) {
        self.service.drain().await.expect("Failed to drain service");
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&body_bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Default configuration bound to localhost.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 8080,
        },
        ..Default::default()
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
