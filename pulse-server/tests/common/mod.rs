//! Helpers to drive the router without a running server.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use pulse::db::models::NewUser;
use pulse::{SqliteStorage, Storage};
use pulse_server::{AppState, Settings};

pub struct TestApp {
    pub router: Router,
    pub storage: SqliteStorage,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(Settings::production()).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        Self::build(settings, None)
    }

    /// Also serves the SPA build found in `dir`.
    pub async fn with_static_dir(dir: &Path) -> Self {
        Self::build(Settings::production(), Some(dir))
    }

    fn build(settings: Settings, static_dir: Option<&Path>) -> Self {
        let storage = SqliteStorage::open(":memory:", 1).expect("in-memory database");
        let state = AppState::new(Arc::new(storage.clone()), settings);
        let router = pulse_server::app(state, static_dir);
        Self { router, storage }
    }

    /// Creates the user and returns a live session id for them.
    pub async fn login(&self, user_id: &str) -> String {
        let mut user = NewUser::new(user_id);
        user.email = Some(format!("{}@example.com", user_id));
        self.storage.upsert_user(user).await.expect("user");
        self.storage
            .create_session(user_id, TimeDelta::hours(1))
            .await
            .expect("session")
            .sid
    }

    pub async fn send(&self, req: TestRequest) -> (StatusCode, Value) {
        send(&self.router, req).await
    }

    pub async fn send_with_headers(&self, req: TestRequest) -> (StatusCode, HeaderMap, Value) {
        send_with_headers(&self.router, req).await
    }
}

pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(header::HeaderName, String)>,
    body: Option<String>,
}

impl TestRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            method: Method::GET,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(uri: &str) -> Self {
        Self {
            method: Method::POST,
            ..Self::get(uri)
        }
    }

    pub fn bearer(mut self, sid: &str) -> Self {
        self.headers
            .push((header::AUTHORIZATION, format!("Bearer {}", sid)));
        self
    }

    pub fn cookie(mut self, sid: &str) -> Self {
        self.headers.push((header::COOKIE, format!("sid={}", sid)));
        self
    }

    pub fn header(mut self, name: header::HeaderName, value: &str) -> Self {
        self.headers.push((name, value.to_owned()));
        self
    }

    pub fn json(mut self, body: &Value) -> Self {
        self.body = Some(body.to_string());
        self.headers
            .push((header::CONTENT_TYPE, "application/json".to_owned()));
        self
    }

    pub fn raw(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self.headers
            .push((header::CONTENT_TYPE, "application/json".to_owned()));
        self
    }

    fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        builder
            .body(self.body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("valid request")
    }
}

pub async fn send(router: &Router, req: TestRequest) -> (StatusCode, Value) {
    let (status, _, value) = send_with_headers(router, req).await;
    (status, value)
}

pub async fn send_with_headers(router: &Router, req: TestRequest) -> (StatusCode, HeaderMap, Value) {
    let response = router
        .clone()
        .oneshot(req.build())
        .await
        .expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, headers, value)
}
