//! Shared helpers for talent-server integration tests
//!
//! Each test gets its own temporary root folder holding the spreadsheet and
//! the user database, with the default admin account seeded.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use talent_common::config::AppConfig;
use talent_common::db::{self, init_database};
use talent_server::{build_router, AppState};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password123";

/// Router plus the state and temp folder backing it
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Send one request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Log in and return the `name=value` cookie pair
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.send(login_request(username, password)).await;
        assert_eq!(response.status(), StatusCode::OK, "login as {} failed", username);
        session_cookie(&response).expect("login should set a session cookie")
    }

    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Send a request and decode the JSON body
    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        (status, extract_json(response.into_body()).await)
    }
}

/// Fresh app over an empty temp root folder
pub async fn setup_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::for_root(temp_dir.path());

    let pool = init_database(&config.user_db).await.unwrap();
    db::initialize(&pool, ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    let state = AppState::from_config(pool, &config);
    TestApp {
        app: build_router(state.clone()),
        state,
        _temp_dir: temp_dir,
    }
}

/// Request without a body
pub fn test_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Request with a JSON body
pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Form-encoded POST /login
pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", username, password)))
        .unwrap()
}

/// `name=value` part of the response's Set-Cookie header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = body.collect().await.expect("Should read body").to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
