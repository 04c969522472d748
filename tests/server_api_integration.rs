//! HTTP API integration tests, driving the router in-process via
//! `tower::ServiceExt::oneshot`.

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use provec::{EmbeddingSourceConfig, ProvecConfig};
use server::{build_router, ServerConfig, ServerState};

const API_KEY: &str = "test-key";

/// Router backed by a two-token vocabulary ("python", "design") so
/// out-of-vocabulary profiles genuinely produce zero vectors.
fn make_app(rate_limit_per_minute: u32) -> axum::Router {
    let mut table = tempfile::NamedTempFile::new().unwrap();
    writeln!(table, "python 1.0 0.0").unwrap();
    writeln!(table, "design 0.0 1.0").unwrap();

    let mut config = ServerConfig::default();
    config.api_keys.insert(API_KEY.into());
    config.rate_limit_per_minute = rate_limit_per_minute;

    let pipeline = ProvecConfig {
        embedding: EmbeddingSourceConfig {
            mode: "table".into(),
            table_path: Some(table.path().to_string_lossy().into_owned()),
            dimension: 100,
        },
        ..ProvecConfig::default()
    };

    let state = ServerState::with_pipeline(config, pipeline).unwrap();
    build_router(Arc::new(state))
}

fn post_json(uri: &str, body: Value, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public_and_reports_dimension() {
    let app = make_app(100);
    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["vector_dim"], 2);
    assert_eq!(body["index"], "provec-profiles");
}

#[tokio::test]
async fn protected_routes_require_a_valid_key() {
    let app = make_app(100);
    let payload = json!({ "profile": { "skills": ["Python"] } });

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/match", payload.clone(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(post_json("/api/v1/match", payload, Some("wrong-key")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "AUTH_FAILED");
}

#[tokio::test]
async fn register_then_match_roundtrip() {
    let app = make_app(100);

    // Register a python profile.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/profiles",
            json!({
                "profile": { "skills": ["Python"], "one_line_bio": "backend" },
                "version": "v2"
            }),
            Some(API_KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let profile_id = body["profile_id"].as_str().unwrap().to_string();
    assert!(profile_id.starts_with("user_"));
    // Nobody else is registered yet.
    assert_eq!(body["total_matches"], 0);

    // A similar profile now finds it.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/match",
            json!({ "profile": { "skills": "Python" } }),
            Some(API_KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total_matches"], 1);
    assert_eq!(body["matches"][0]["profile_id"], profile_id.as_str());
    assert_eq!(body["matches"][0]["rank"], 1);
    assert_eq!(body["matches"][0]["metadata"]["schema_version"], "v2");

    // The stored profile is retrievable and deletable.
    let uri = format!("/api/v1/profiles/{profile_id}");
    let response = app
        .clone()
        .oneshot(get(&uri, Some(API_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["vector_dim"], 2);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .header("x-api-key", API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get(&uri, Some(API_KEY))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn meaningless_profile_is_rejected_with_400() {
    let app = make_app(100);

    // Entirely out-of-vocabulary profile: vector comes out all-zero.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/match",
            json!({ "profile": { "skills": ["COBOL", "Fortran"] } }),
            Some(API_KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INSUFFICIENT_SIGNAL");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("meaningful vector"));

    // Registration applies the same gate and stores nothing.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/profiles",
            json!({ "profile": { "skills": ["COBOL"] } }),
            Some(API_KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/api/v1/index/stats", Some(API_KEY)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["profiles"], 0);
}

#[tokio::test]
async fn rate_limit_returns_429_after_budget_is_spent() {
    let app = make_app(2);
    let payload = json!({ "profile": { "skills": ["Python"] } });

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/match", payload.clone(), Some(API_KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(post_json("/api/v1/match", payload, Some(API_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn unknown_routes_return_the_error_envelope() {
    let app = make_app(100);
    let response = app.oneshot(get("/api/v1/nope", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn api_info_lists_endpoints() {
    let app = make_app(100);
    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["api_version"], "v1");
    assert!(body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "/api/v1/match"));
}
