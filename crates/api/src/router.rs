//! The one place the HTTP surface is assembled.
//!
//! `main.rs` and `tests/common/mod.rs` both call [`build_app_router`], so
//! tests exercise the production layers, session gates included.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Assemble every route group under the shared middleware.
///
/// Layers, outermost first: CORS, request id assignment, tracing, request id
/// echo, timeout, panic recovery. The session gate is not part of this
/// stack; it is layered per route group in [`routes::api_routes`] and
/// [`routes::page_routes`].
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        // Liveness plus mailbox peek, outside /api.
        .merge(routes::health::router())
        // Scan events from the bridge (open).
        .merge(routes::access::router())
        // Login, logout and the dashboard page.
        .merge(routes::page_routes(&state))
        // JSON API: bridge exchange plus the operator resources.
        .nest("/api", routes::api_routes(&state))
        // -- Middleware stack (applied bottom-up) --
        // A panicking handler becomes a 500 instead of a dropped connection.
        .layer(CatchPanicLayer::new())
        // Bounded per request; the bridge has its own shorter client timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Echo x-request-id back to the caller.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // One INFO span per request, closed with status and latency.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Assign x-request-id when the client sent none.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // Dashboard origins, with credentials so the session cookie is sent.
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured dashboard origins.
///
/// Only the methods the API routes use are allowed. Panics at startup if
/// any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
