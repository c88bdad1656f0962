mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use time::macros::date;

use common::{body_json, build_test_app, get, seed_actor, send_json};

// ---------------------------------------------------------------------------
// Test: health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_ok() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/health").await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: error envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_uses_error_envelope() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/genres/5").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Genre with id 5 not found");
    assert!(body["data"].is_null());
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn success_uses_data_envelope() {
    let app = build_test_app();

    let response = send_json(&app.router, Method::POST, "/api/v1/genres", json!({ "name": "Noir" }), None).await;

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert!(body.get("code").is_none());
    assert_eq!(body["data"]["name"], "Noir");
}

#[tokio::test]
async fn validation_errors_use_camel_case_fields() {
    let app = build_test_app();

    let ops = json!([{ "op": "replace", "path": "/dateOfBirth", "value": "not-a-date" }]);
    let stored = seed_actor(&app.state, "Ana", date!(1980 - 01 - 01)).await;

    let uri = format!("/api/v1/actors/{}", stored.id);
    let response = send_json(&app.router, Method::PATCH, &uri, ops, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["field"], "dateOfBirth");
}

#[tokio::test]
async fn unsupported_patch_path_is_rejected() {
    let app = build_test_app();
    send_json(&app.router, Method::POST, "/api/v1/genres", json!({ "name": "Noir" }), None).await;

    let ops = json!([{ "op": "replace", "path": "/budget", "value": 10 }]);
    let response = send_json(&app.router, Method::PATCH, "/api/v1/genres/1", ops, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: rejected input still uses the error envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_id_is_a_client_error() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/genres/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_nested_id_is_a_client_error() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/movies/x/reviews").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn missing_json_field_is_a_field_error() {
    let app = build_test_app();

    let response = send_json(&app.router, Method::POST, "/api/v1/genres", json!({}), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["message"], "The name field is required");
}

#[tokio::test]
async fn wrong_json_type_is_a_field_error() {
    let app = build_test_app();

    let body = json!({ "name": "Sala 1", "latitude": "north" });
    let response = send_json(&app.router, Method::POST, "/api/v1/cinema-rooms", body, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["field"], "latitude");
}

#[tokio::test]
async fn malformed_query_value_is_a_field_error() {
    let app = build_test_app();

    let response = get(&app.router, "/api/v1/movies/filter?genreId=x").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"][0]["field"], "genreId");
}

#[tokio::test]
async fn non_multipart_form_is_a_bad_request() {
    let app = build_test_app();

    let response = send_json(&app.router, Method::POST, "/api/v1/actors", json!({ "name": "Ana" }), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
