//! The access-log middleware with request logging on at DEBUG level.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;
use student_api::config::{Environment, LogLevel, Settings};

fn debug_settings() -> Settings {
    let mut settings = Settings::for_env(Environment::Test);
    settings.log.level = LogLevel::Debug;
    settings.log.request_log = true;
    settings
}

#[tokio::test]
async fn buffered_body_still_reaches_the_handler() {
    let app = TestApp::with_settings(debug_settings()).await;
    let user = app.token("7", &[]);

    let (status, body) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "Ann" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 12);
    assert_eq!(app.store.stored_rows().await, 1);

    let (_, body) = app.get("/v2/student/1").await;
    assert_eq!(body["name"], "Ann");
}

#[tokio::test]
async fn non_json_body_is_handled_by_the_route() {
    let app = TestApp::with_settings(debug_settings()).await;
    let user = app.token("7", &[]);

    let (status, body) = app
        .send_raw(Method::POST, "/v2/student", Some(&user), Some("name=Ann".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 10030);
    assert_eq!(app.store.stored_rows().await, 0);
}

#[tokio::test]
async fn query_and_bodyless_requests_pass_through() {
    let app = TestApp::with_settings(debug_settings()).await;
    let user = app.token("7", &[]);
    app.send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "Annie" }))).await;

    let (status, body) = app.get("/v2/student/search?q=nn").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_body_is_rejected_by_the_route_not_the_logger() {
    let mut settings = debug_settings();
    settings.body_limit = 64;
    let app = TestApp::with_settings(settings).await;
    let user = app.token("7", &[]);

    let (status, _) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "x".repeat(100) })))
        .await;
    assert!(status.is_client_error());
    assert_eq!(app.store.stored_rows().await, 0);

    // small bodies under the same limit still go through
    let (status, _) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "Ann" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
