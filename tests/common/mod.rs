//! Shared helpers: an app backed by the in-memory store and request shortcuts.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use student_api::config::{Environment, Settings};
use student_api::routes::permission_registry;
use student_api::{build_router, AppState, MemoryStore, PermissionStore};
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(Settings::for_env(Environment::Test)).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let registry = permission_registry().unwrap();
        let store = Arc::new(MemoryStore::new());
        store.sync(&registry.keys()).await.unwrap();
        let state = AppState::new(settings, store.clone(), store.clone(), registry);
        TestApp { state, store }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn token(&self, sub: &str, groups: &[&str]) -> String {
        self.state.jwt.issue(sub, groups).unwrap()
    }

    pub fn root_token(&self) -> String {
        self.token("admin", &["root"])
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        self.send_raw(method, uri, token, body.map(|json| json.to_string())).await
    }

    /// Like `send`, but the body is sent verbatim as `application/json`.
    pub async fn send_raw(&self, method: Method, uri: &str, token: Option<&str>, body: Option<String>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(text) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(text)
            }
            None => Body::empty(),
        };
        let response = self.router().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }
}
