//! Router fixtures shared by handler tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use crate::app_state::AppState;
use crate::config::SiteConfig;
use crate::content::testing::FakeStore;

/// Configuration from defaults plus `overrides`.
pub(crate) fn test_config(overrides: &[(&str, &str)]) -> SiteConfig {
    let vars: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let Ok(config) = SiteConfig::from_lookup(|key| vars.get(key).cloned()) else {
        panic!("test configuration should parse");
    };
    config
}

pub(crate) fn test_state(store: FakeStore, overrides: &[(&str, &str)]) -> AppState {
    AppState::new(test_config(overrides), Arc::new(store))
}

pub(crate) fn test_app(store: FakeStore, overrides: &[(&str, &str)]) -> Router {
    crate::build_app(test_state(store, overrides))
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    let Ok(request) = Request::get(uri).body(Body::empty()) else {
        panic!("GET {uri} should build");
    };
    request
}

pub(crate) fn post_json(uri: &str, body: &str) -> Request<Body> {
    let Ok(request) = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
    else {
        panic!("POST {uri} should build");
    };
    request
}

/// Fully buffered response.
#[derive(Debug)]
pub(crate) struct TestResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

impl TestResponse {
    pub(crate) fn json(&self) -> Value {
        let Ok(value) = serde_json::from_str(&self.body) else {
            panic!("body is not JSON: {}", self.body);
        };
        value
    }

    pub(crate) fn header(&self, name: HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub(crate) async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let Ok(response) = app.clone().oneshot(request).await;
    let status = response.status();
    let headers = response.headers().clone();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body should buffer");
    };
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
