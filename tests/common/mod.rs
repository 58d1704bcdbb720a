#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use polis::router::init_router;
use polis::state::AppState;
use polis_config::CorsConfig;
use polis_db::MemoryRepository;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Router backed by a fresh in-memory repository.
pub fn setup_test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryRepository::new()), CorsConfig::default());
    init_router(state)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// POST without a body, which the handlers treat as absent input.
pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub fn status_codes(body: &Value) -> Vec<String> {
    body["status"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["code"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub async fn create_teacher(app: &Router, first_name: &str, last_name: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/teacher/upsert",
        json!({"firstName": first_name, "lastName": last_name, "title": "Dr."}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

pub async fn create_course(app: &Router, code: &str, title: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/course/upsert",
        json!({"code": code, "title": title, "description": format!("{title} course"), "year": 2025}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

pub async fn create_student(app: &Router, first_name: &str, last_name: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/student/upsert",
        json!({
            "firstName": first_name,
            "lastName": last_name,
            "email": format!("{}.{}@polis.edu", first_name.to_lowercase(), last_name.to_lowercase()),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

pub fn filter_body(filter: &str, page_number: i64, page_size: i64) -> Value {
    json!({
        "filter": filter,
        "pagination": {"pageNumber": page_number, "pageSize": page_size}
    })
}
