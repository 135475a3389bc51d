//! Shared harness: in-memory stores, services and router

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;

use upkeep_server::{
    config::AppConfig,
    create_router,
    repository::{schema::ensure_schema, Repository},
    services::Services,
    AppState,
};

pub const TEST_PASSWORD: &str = "Secure#Pass1";

/// Single-connection in-memory database that lives as long as the pool
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

/// Repository over three fresh stores with the schema in place
pub async fn repository() -> Repository {
    let repository = Repository::new(memory_pool().await, memory_pool().await, memory_pool().await);
    ensure_schema(&repository).await.expect("schema");
    repository
}

pub async fn services() -> Services {
    services_with(AppConfig::default()).await
}

pub async fn services_with(config: AppConfig) -> Services {
    Services::new(repository().await, config.auth.clone(), config.requests.clone())
}

pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let services = services_with(config.clone()).await;
        let state = AppState {
            config: Arc::new(config),
            services: Arc::new(services),
        };
        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    /// Send a request and return the status with the body parsed as JSON
    /// (Null for an empty body)
    pub async fn call(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.call_raw(method, uri, token, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn call_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let response = self.send(method, uri, token, body).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, bytes.to_vec())
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(format!("/api/v1{}", uri));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.router.clone().oneshot(request).await.expect("response")
    }

    /// Sign up and log in, returning the bearer token
    pub async fn login_as(&self, email: &str) -> String {
        let (status, _) = self
            .call(
                Method::POST,
                "/auth/signup",
                None,
                Some(json!({
                    "full_name": "Test User",
                    "email": email,
                    "password": TEST_PASSWORD,
                    "confirm_password": TEST_PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .call(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token").to_string()
    }
}
