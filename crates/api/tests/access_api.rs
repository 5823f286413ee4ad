//! HTTP-level tests for `POST /access`, the decision endpoint used by the
//! sensor bridge.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use biogate_core::access::AccessPolicy;
use biogate_db::models::user::{CreateUser, UpdateUser};
use biogate_db::repositories::{AccessEventRepo, UserRepo};
use chrono::Timelike;
use common::{body_json, post_json};
use serde_json::json;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn enroll(pool: &SqlitePool, id: i64, name: &str, role: &str) {
    UserRepo::create(
        pool,
        &CreateUser {
            id,
            name: name.to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
}

async fn scan(app: axum::Router, finger_id: i64, confidence: i64) -> serde_json::Value {
    let response = post_json(
        app,
        "/access",
        json!({ "fingerID": finger_id, "confidence": confidence }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Policy whose visitor window excludes (or includes) the current local hour.
fn visitor_policy(include_now: bool) -> AccessPolicy {
    let hour = AccessPolicy::default().now().hour();
    let (start, end) = match (include_now, hour < 12) {
        (true, true) | (false, false) => (0, 12),
        (true, false) | (false, true) => (12, 24),
    };
    AccessPolicy {
        visitor_hours: start..end,
        ..AccessPolicy::default()
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_finger_is_logged_as_denied(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());

    let json = scan(app, 42, 99).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Access registered");
    assert_eq!(json["authorized"], false);
    assert_eq!(json["prediction"], "Unknown");

    let logged = AccessEventRepo::recent_with_users(&pool, 10).await.unwrap();
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].event.finger_id, 42);
    assert_eq!(logged[0].event.confidence, 99);
    assert!(!logged[0].event.is_authorized);
    assert_eq!(logged[0].event.prediction, "Unknown");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn employee_needs_confidence_80(pool: SqlitePool) {
    enroll(&pool, 1, "Alice", "Employee").await;
    let app = common::build_test_app(pool);

    let json = scan(app.clone(), 1, 85).await;
    assert_eq!(json["authorized"], true);
    assert_eq!(json["prediction"], "Normal");

    let json = scan(app.clone(), 1, 80).await;
    assert_eq!(json["authorized"], true);

    let json = scan(app, 1, 40).await;
    assert_eq!(json["authorized"], false);
    assert_eq!(json["prediction"], "Low Confidence");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn administrator_is_always_admitted_and_flagged_when_weak(pool: SqlitePool) {
    enroll(&pool, 1, "Root", "Administrator").await;
    let app = common::build_test_app(pool);

    let json = scan(app.clone(), 1, 90).await;
    assert_eq!(json["authorized"], true);
    assert_eq!(json["prediction"], "Admin Access");

    let json = scan(app, 1, 10).await;
    assert_eq!(json["authorized"], true);
    assert_eq!(json["prediction"], "Limit Score Alert");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inactive_account_is_denied(pool: SqlitePool) {
    enroll(&pool, 3, "Carol", "Administrator").await;
    let patch = UpdateUser {
        is_active: Some(false),
        ..Default::default()
    };
    UserRepo::update(&pool, 3, &patch).await.unwrap();
    let app = common::build_test_app(pool);

    let json = scan(app, 3, 100).await;
    assert_eq!(json["authorized"], false);
    assert_eq!(json["prediction"], "Inactive Account");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn french_role_labels_are_understood(pool: SqlitePool) {
    enroll(&pool, 4, "Dora", "Employé").await;
    let app = common::build_test_app(pool);

    let json = scan(app, 4, 60).await;
    assert_eq!(json["authorized"], false);
    assert_eq!(json["prediction"], "Low Confidence");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unrecognized_role_falls_back_to_permit(pool: SqlitePool) {
    enroll(&pool, 5, "Eve", "Contractor").await;
    let app = common::build_test_app(pool);

    let json = scan(app.clone(), 5, 70).await;
    assert_eq!(json["authorized"], true);
    assert_eq!(json["prediction"], "Normal");

    let json = scan(app, 5, 20).await;
    assert_eq!(json["authorized"], true);
    assert_eq!(json["prediction"], "Limit Score Alert");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn visitor_is_gated_by_local_hours(pool: SqlitePool) {
    enroll(&pool, 6, "Bob", "Visitor").await;

    let mut config = common::test_config();
    config.policy = visitor_policy(true);
    let app = common::build_test_app_with(pool.clone(), config);
    let json = scan(app, 6, 90).await;
    assert_eq!(json["authorized"], true);
    assert_eq!(json["prediction"], "Normal");

    let mut config = common::test_config();
    config.policy = visitor_policy(false);
    let app = common::build_test_app_with(pool, config);
    let json = scan(app, 6, 90).await;
    assert_eq!(json["authorized"], false);
    assert_eq!(json["prediction"], "Outside Hours");
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_fields_are_rejected_without_logging(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());

    for body in [
        json!({ "fingerID": 1 }),
        json!({ "confidence": 90 }),
        json!({}),
        json!({ "fingerID": "one", "confidence": 90 }),
    ] {
        let response = post_json(app.clone(), "/access", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid data");
    }

    let totals = AccessEventRepo::totals(&pool).await.unwrap();
    assert_eq!(totals.total, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_json_body_is_rejected(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let request = Request::post("/access")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("fingerID=1"))
        .unwrap();
    let response = common::send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid data");
}
