//! End-to-end tests for the `/v2/student` routes against the in-memory store.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;
use student_api::auth::Claims;

#[tokio::test]
async fn create_list_update_delete_flow() {
    let app = TestApp::new().await;
    let user = app.token("7", &["teachers"]);
    let root = app.root_token();

    let (status, body) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "Ann", "phone": "555" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "code": 12, "message": "student created" }));

    let (status, body) = app.get("/v2/student").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 1, "name": "Ann", "parent": "未名", "phone": "555", "address": null }])
    );

    let (status, body) = app
        .send(Method::PUT, "/v2/student/1", Some(&user), Some(json!({ "name": "Anna", "parent": "Bob" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 13);

    let (_, body) = app.get("/v2/student/1").await;
    assert_eq!(body, json!({ "id": 1, "name": "Anna", "parent": "Bob", "phone": null, "address": null }));

    let (status, body) = app.send(Method::DELETE, "/v2/student/1", Some(&root), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 14);

    let (status, body) = app.get("/v2/student/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 10022);

    let (_, body) = app.get("/v2/student").await;
    assert_eq!(body, json!([]));

    // soft delete keeps the row
    assert_eq!(app.store.stored_rows().await, 1);
    assert!(app.store.row_times(1).await.unwrap().delete_time.is_some());
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let app = TestApp::new().await;
    let user = app.token("7", &[]);
    for name in ["Cy", "Ann", "Bo"] {
        app.send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": name }))).await;
    }
    let (_, body) = app.get("/v2/student").await;
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn search_matches_literal_substrings() {
    let app = TestApp::new().await;
    let user = app.token("7", &[]);
    for name in ["Annie", "Joanna", "Bob", "50%_off"] {
        app.send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": name }))).await;
    }

    let (status, body) = app.get("/v2/student/search?q=nn").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Annie", "Joanna"]);

    let (_, body) = app.get("/v2/student/search?q=%25_").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = app.get("/v2/student/search?q=").await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (_, body) = app.get("/v2/student/search?q=zzz").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn repeated_search_returns_the_same_rows_and_changes_nothing() {
    let app = TestApp::new().await;
    let user = app.token("7", &[]);
    for name in ["Annie", "Joanna", "Bob"] {
        app.send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": name }))).await;
    }
    let (_, before) = app.get("/v2/student").await;

    let (first_status, first) = app.get("/v2/student/search?q=an").await;
    let (second_status, second) = app.get("/v2/student/search?q=an").await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first.as_array().unwrap().len(), 1);

    let (_, after) = app.get("/v2/student").await;
    assert_eq!(before, after);
    assert_eq!(app.store.stored_rows().await, 3);
}

#[tokio::test]
async fn search_requires_q() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/v2/student/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 10030);
}

#[tokio::test]
async fn writes_without_token_are_rejected_and_change_nothing() {
    let app = TestApp::new().await;
    let user = app.token("7", &[]);
    app.send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "Ann" }))).await;

    let (status, body) = app.send(Method::POST, "/v2/student", None, Some(json!({ "name": "Eve" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 10000);

    let (status, _) = app.send(Method::PUT, "/v2/student/1", None, Some(json!({ "name": "Eve" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::DELETE, "/v2/student/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.get("/v2/student").await;
    assert_eq!(body, json!([{ "id": 1, "name": "Ann", "parent": "未名", "phone": null, "address": null }]));
}

#[tokio::test]
async fn bad_and_expired_tokens() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/v2/student", Some("not-a-jwt"), Some(json!({ "name": "Ann" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 10041);

    let now = chrono::Utc::now().timestamp();
    let expired = app
        .state
        .jwt
        .encode(&Claims {
            sub: "7".into(),
            groups: vec![],
            iat: now - 7200,
            exp: now - 3600,
        })
        .unwrap();
    let (status, body) = app
        .send(Method::POST, "/v2/student", Some(&expired), Some(json!({ "name": "Ann" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 10042);
    assert_eq!(app.store.stored_rows().await, 0);
}

#[tokio::test]
async fn validation_failures_return_parameter_error() {
    let app = TestApp::new().await;
    let user = app.token("7", &[]);

    let long_name = "x".repeat(51);
    let (status, body) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": long_name })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 10030);

    let (status, _) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "phone": "555" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // fifty multi-byte characters fit
    let (status, _) = app
        .send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "学".repeat(50) })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.store.stored_rows().await, 1);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let user = app.token("7", &[]);

    let (status, body) = app.get("/v2/student/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 10022);

    let (status, _) = app
        .send(Method::PUT, "/v2/student/99", Some(&user), Some(json!({ "name": "Ann" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, "/v2/student/99", Some(&app.root_token()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/v2/student/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 10030);
}

#[tokio::test]
async fn deleted_student_cannot_be_updated_or_deleted_again() {
    let app = TestApp::new().await;
    let user = app.token("7", &[]);
    let root = app.root_token();
    app.send(Method::POST, "/v2/student", Some(&user), Some(json!({ "name": "Ann" }))).await;
    app.send(Method::DELETE, "/v2/student/1", Some(&root), None).await;

    let (status, _) = app
        .send(Method::PUT, "/v2/student/1", Some(&user), Some(json!({ "name": "Ann" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, "/v2/student/1", Some(&root), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn common_routes_and_openapi() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "ok");

    let (_, body) = app.get("/version").await;
    assert_eq!(body["name"], "student-api");

    let (status, body) = app.get("/apidoc/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/v2/student/{id}"].is_object());
    assert!(body["paths"]["/cms/admin/permission/dispatch"].is_object());
}
