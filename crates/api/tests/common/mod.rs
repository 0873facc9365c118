//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! that production uses, and mints JWTs against the test secret the way
//! the external auth service would.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use recipeshare_api::auth::jwt::{generate_access_token, JwtConfig};
use recipeshare_api::config::ServerConfig;
use recipeshare_api::routes;
use recipeshare_api::state::AppState;
use recipeshare_core::types::DbId;

/// Shared JWT secret between the test app and minted tokens.
const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
///
/// Strict rating updates are on, matching the production default.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        strict_rating_updates: true,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Mint an access token for the given identity, signed with the test secret.
pub fn auth_token(user_id: DbId, display_name: &str) -> String {
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    };
    generate_access_token(user_id, display_name, &config)
        .expect("test token generation should succeed")
}

/// Send a GET request (no auth).
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and optional bearer token.
pub async fn post_json(
    app: Router,
    path: &str,
    body: Value,
    token: Option<&str>,
) -> Response<Body> {
    send_json(app, Method::POST, path, body, token).await
}

/// Send a PUT request with a JSON body and optional bearer token.
pub async fn put_json(
    app: Router,
    path: &str,
    body: Value,
    token: Option<&str>,
) -> Response<Body> {
    send_json(app, Method::PUT, path, body, token).await
}

/// Send a DELETE request with an optional bearer token.
pub async fn delete(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(path);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(
    app: Router,
    method: Method,
    path: &str,
    body: Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

/// A minimal valid recipe payload for create requests.
pub fn sample_recipe(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": "A family favourite.",
        "ingredients": [
            {"name": "flour", "amount": "2", "unit": "cups"},
            {"name": "eggs", "amount": "3", "unit": ""}
        ],
        "steps": [
            {"number": 1, "content": "Mix everything."},
            {"number": 2, "content": "Bake at 180C for 40 minutes."}
        ]
    })
}

/// Create a recipe through the API, returning its id.
pub async fn seed_recipe(pool: &PgPool, token: &str, title: &str) -> DbId {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/recipes", sample_recipe(title), Some(token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("recipe id")
}
