//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (minus the per-IP rate limiter, which needs
//! socket connect info that `tower::ServiceExt::oneshot` does not provide)
//! and exposes request helpers plus seed/login utilities.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use clinidex_api::auth::jwt::JwtConfig;
use clinidex_api::auth::password::hash_password;
use clinidex_api::config::ServerConfig;
use clinidex_api::routes;
use clinidex_api::state::AppState;
use clinidex_db::models::user::{CreateUser, User};
use clinidex_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        rate_limit_per_second: 10,
        rate_limit_burst: 50,
        jwt: JwtConfig {
            secret: "clinidex-integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        admin_bootstrap: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
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
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
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

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!("body is not JSON ({e}): {:?}", String::from_utf8_lossy(&bytes))
    })
}

/// Collect the raw response body bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Seed / login helpers
// ---------------------------------------------------------------------------

/// Password used by every seeded test user.
pub const TEST_PASSWORD: &str = "mot-de-passe-test";

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
        name: format!("Dr. {email}"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log a seeded user in via the API and return their access token.
pub async fn login(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "login should succeed for seeded user {email}"
    );
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

/// Seed a user and log them in; returns `(user, access_token)`.
pub async fn seed_and_login(pool: &PgPool, app: Router, email: &str, role: &str) -> (User, String) {
    let user = seed_user(pool, email, role).await;
    let token = login(app, email).await;
    (user, token)
}
