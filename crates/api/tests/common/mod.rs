#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use biogate_api::auth::session::{issue_session_token, SessionConfig, DEFAULT_COOKIE_NAME};
use biogate_api::config::{BootstrapAdmin, ServerConfig};
use biogate_api::router::build_app_router;
use biogate_api::state::AppState;
use biogate_core::access::AccessPolicy;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and the default policy.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            ttl_hours: 12,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: false,
        },
        bootstrap_admin: BootstrapAdmin {
            username: "admin".to_string(),
            password: "admin".to_string(),
        },
        policy: AccessPolicy::default(),
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: SqlitePool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// `Cookie` header value carrying a valid operator session.
pub fn session_cookie() -> String {
    let token = issue_session_token(1, "admin", &test_config().session)
        .expect("token signing should succeed");
    format!("{DEFAULT_COOKIE_NAME}={token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, session_cookie())
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = json_request(Method::POST, uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = json_request(Method::POST, uri)
        .header(COOKIE, session_cookie())
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = json_request(Method::PUT, uri)
        .header(COOKIE, session_cookie())
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header(COOKIE, session_cookie())
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
