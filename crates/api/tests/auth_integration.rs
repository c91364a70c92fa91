//! Integration tests for the authentication boundary and error surface.
//!
//! No database is required: every request here is resolved before a query
//! runs (rejected tokens, validation failures, probes, the unconfigured
//! study-plan proxy).

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{bearer_for, create_test_app, lazy_pool, test_config};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn json_request(method: Method, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = create_test_app(test_config(), lazy_pool());

    let response = app.oneshot(get_request("/api/v1/spaces", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let app = create_test_app(test_config(), lazy_pool());

    let response = app
        .oneshot(get_request("/api/v1/spaces", Some("Bearer not.a.token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_rejected() {
    let app = create_test_app(test_config(), lazy_pool());

    let response = app
        .oneshot(get_request("/api/v1/spaces", Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = create_test_app(test_config(), lazy_pool());
    let token = shared::jwt::mint_test_token(common::TEST_SECRET, Uuid::new_v4(), -60);

    let response = app
        .oneshot(get_request(
            "/api/v1/spaces",
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let app = create_test_app(test_config(), lazy_pool());
    let token = shared::jwt::mint_test_token("another_secret_entirely_9876543210", Uuid::new_v4(), 900);

    let response = app
        .oneshot(get_request(
            "/api/v1/spaces",
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_reaches_validation() {
    let app = create_test_app(test_config(), lazy_pool());
    let auth = bearer_for(Uuid::new_v4());

    // Blank name fails validation before any query runs
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/spaces",
            Some(&auth),
            json!({ "name": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_empty_join_code_rejected() {
    let app = create_test_app(test_config(), lazy_pool());
    let auth = bearer_for(Uuid::new_v4());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/spaces/join",
            Some(&auth),
            json!({ "code": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_role_rejected_before_any_write() {
    let app = create_test_app(test_config(), lazy_pool());
    let auth = bearer_for(Uuid::new_v4());
    let uri = format!(
        "/api/v1/spaces/{}/members/{}/role",
        Uuid::new_v4(),
        Uuid::new_v4()
    );

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &uri,
            Some(&auth),
            json!({ "role": "owner" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_blank_task_content_update_rejected() {
    let app = create_test_app(test_config(), lazy_pool());
    let auth = bearer_for(Uuid::new_v4());
    let uri = format!("/api/v1/tasks/{}", Uuid::new_v4());

    // Blank content fails validation before the task is even looked up
    let response = app
        .oneshot(json_request(
            Method::PUT,
            &uri,
            Some(&auth),
            json!({ "content": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_blank_note_content_rejected() {
    let app = create_test_app(test_config(), lazy_pool());
    let auth = bearer_for(Uuid::new_v4());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/notes",
            Some(&auth),
            json!({ "content": "  ", "pos_x": 0.5, "pos_y": 0.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_study_plan_unconfigured_returns_503() {
    let app = create_test_app(test_config(), lazy_pool());
    let auth = bearer_for(Uuid::new_v4());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/study-plan",
            Some(&auth),
            json!({ "prompt": "Plan my week for the calculus midterm" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "service_unavailable");
}

#[tokio::test]
async fn test_liveness_probe_is_public() {
    let app = create_test_app(test_config(), lazy_pool());

    let response = app
        .oneshot(get_request("/api/health/live", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = create_test_app(test_config(), lazy_pool());

    let response = app
        .oneshot(get_request("/api/health/live", None))
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn test_request_id_header_present() {
    let app = create_test_app(test_config(), lazy_pool());

    let response = app
        .oneshot(get_request("/api/health/live", None))
        .await
        .unwrap();

    let request_id = response.headers().get("X-Request-ID");
    assert!(request_id.is_some(), "response should carry a request id");
    assert!(!request_id.unwrap().to_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app(test_config(), lazy_pool());

    let response = app
        .oneshot(get_request("/api/v1/does-not-exist", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
