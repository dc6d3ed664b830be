//! Router-level tests against the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use abtest_server::{build_router, AppState, MemoryStore, ServerConfig, Store};

fn app_with(store: Arc<MemoryStore>) -> Router {
    let store: Arc<dyn Store> = store;
    build_router(AppState::from_arc(store), &ServerConfig::default())
}

fn app() -> Router {
    app_with(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_control(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/variant",
        Some(json!({"name": "control", "percent": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "abtest");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_is_not_under_api_prefix() {
    let (status, _) = send(&app(), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_variant_echoes_request() {
    let app = app();
    let body = create_control(&app).await;

    assert_eq!(body["name"], "control");
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["percent"], 50);
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn created_variant_ids_are_fresh() {
    let app = app();
    let first = create_control(&app).await;
    let second = create_control(&app).await;
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn get_variant_matches_creation_response() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/variant",
        Some(json!({"name": "treatment", "description": "red banner", "percent": 20})),
    )
    .await;

    let uri = format!("/api/variant/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn user_round_trip_hydrates_variant() {
    let app = app();
    let variant = create_control(&app).await;
    let variant_id = variant["id"].as_str().unwrap();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/user",
        Some(json!({"variant_id": variant_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["variant_id"], variant_id);
    assert_eq!(created["user_id"], Value::Null);
    assert!(created.get("variant").is_none());

    let uri = format!("/api/user/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["variant_id"], variant_id);
    assert_eq!(fetched["variant"]["name"], "control");
    assert_eq!(fetched["variant"]["description"], Value::Null);
    assert_eq!(fetched["variant"]["percent"], 50);
}

#[tokio::test]
async fn user_keeps_external_id() {
    let app = app();
    let variant = create_control(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/user",
        Some(json!({"user_id": "cookie-abc", "variant_id": variant["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], "cookie-abc");
}

#[tokio::test]
async fn unknown_variant_is_rejected_without_creating_user() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/user",
        Some(json!({"variant_id": Uuid::new_v4()})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "constraint_violation");
    assert_eq!(store.counts().await, (0, 0));
}

#[tokio::test]
async fn unknown_ids_are_404_and_service_keeps_serving() {
    let app = app();

    let uri = format!("/api/variant/{}", Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let uri = format!("/api/user/{}", Uuid::new_v4());
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/variant/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still serving after the misses
    create_control(&app).await;
}

#[tokio::test]
async fn malformed_json_is_400_before_store() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/variant")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"control\", \"percent\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(store.counts().await, (0, 0));
}

#[tokio::test]
async fn wrong_field_type_is_400() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/variant",
        Some(json!({"name": "control", "percent": "fifty"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn missing_content_type_is_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/user")
        .body(Body::from("{}"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn missing_required_fields_name_the_field() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/variant", Some(json!({"percent": 10}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "name is required");

    let (status, body) = send(&app, Method::POST, "/api/user", Some(json!({"user_id": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "variant_id is required");
}

#[tokio::test]
async fn percent_out_of_range_is_400() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/variant",
        Some(json!({"name": "all-in", "percent": 101})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn nul_in_text_fields_is_400_and_nothing_is_stored() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/variant",
        Some(json!({"name": "a\0b", "percent": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "name: must not contain NUL characters");

    let variant = create_control(&app).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/user",
        Some(json!({"user_id": "x\0", "variant_id": variant["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(store.counts().await, (1, 0));
}
