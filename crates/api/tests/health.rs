//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["generator_configured"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_missing_generator(pool: PgPool) {
    let app = common::build_test_app_with(pool, common::test_config(), None);
    let json = body_json(get(app.app(), "/health").await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["generator_configured"], false);
}

// ---------------------------------------------------------------------------
// Test: Unknown API route returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_api_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app.app(), "/api/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app.app(), "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight allows the API key header
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_api_key_header(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type,x-api-key")
        .body(Body::empty())
        .unwrap();

    let response = app.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    let allowed = headers
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("x-api-key"));
}
