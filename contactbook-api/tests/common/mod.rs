// Each test binary compiles this module and uses a different subset of it
#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// Builds the full router over an `InMemoryUserStore` and sends requests to
/// it in-process, no network or database involved.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use contactbook_api::app::{build_router, AppState};
use contactbook_api::config::{ApiConfig, Config, DatabaseConfig};
use contactbook_shared::models::user::{User, UserPayload};
use contactbook_shared::seed::SeedConfig;
use contactbook_shared::store::{memory::InMemoryUserStore, UserStore};
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing the router and direct access to its store
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
    pub store: Arc<InMemoryUserStore>,
}

impl TestContext {
    /// Creates a context with an empty store, already marked ready
    pub fn new() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let state = AppState::new(store.clone(), test_config());
        state.mark_ready();

        TestContext {
            app: build_router(state.clone()),
            state,
            store,
        }
    }

    /// Creates a context whose startup seeding has not run yet
    pub fn not_ready() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let state = AppState::new(store.clone(), test_config());

        TestContext {
            app: build_router(state.clone()),
            state,
            store,
        }
    }

    /// Sends a request and returns the status and parsed JSON body
    ///
    /// Empty bodies come back as `Value::Null`.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    /// Sends a prepared request and returns the status and parsed JSON body
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&body).into_owned())
            })
        };

        (status, json)
    }

    /// Inserts a record straight into the store
    pub async fn insert(&self, name: &str, email: &str) -> User {
        self.store.insert(payload(name, email)).await.unwrap()
    }
}

/// Builds a valid payload with the given name and email
pub fn payload(name: &str, email: &str) -> UserPayload {
    UserPayload {
        name: name.to_string(),
        address: "123 Test St".to_string(),
        email: email.to_string(),
        telephone: "555-1234".to_string(),
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        },
        seed: SeedConfig {
            enabled: true,
            user_count: 25,
        },
    }
}
