//! Handler for scan events pushed by the sensor bridge.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use biogate_core::access::{decide, Prediction, Role, Subject};
use biogate_core::types::FingerId;
use biogate_db::models::access_event::CreateAccessEvent;
use biogate_db::repositories::{AccessEventRepo, UserRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /access`. Both fields are required.
#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    #[serde(rename = "fingerID")]
    pub finger_id: Option<FingerId>,
    pub confidence: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub success: bool,
    pub message: &'static str,
    pub authorized: bool,
    pub prediction: Prediction,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /access
///
/// Decide on one scan and append it to the access log. Malformed bodies are
/// rejected before anything is logged.
pub async fn register_access(
    State(state): State<AppState>,
    payload: Result<Json<AccessRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AccessResponse>)> {
    let (finger_id, confidence) = match payload {
        Ok(Json(AccessRequest {
            finger_id: Some(finger_id),
            confidence: Some(confidence),
        })) => (finger_id, confidence),
        Ok(_) => return Err(AppError::BadRequest("Invalid data".into())),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected access payload");
            return Err(AppError::BadRequest("Invalid data".into()));
        }
    };

    let subject = UserRepo::find_by_id(&state.pool, finger_id)
        .await?
        .map(|user| Subject {
            role: Role::parse(&user.role),
            is_active: user.is_active,
        });

    let policy = &state.config.policy;
    let verdict = decide(subject.as_ref(), confidence, policy.now(), policy);

    AccessEventRepo::insert(
        &state.pool,
        &CreateAccessEvent {
            finger_id,
            confidence,
            is_authorized: verdict.authorized,
            prediction: verdict.prediction.label().to_string(),
            recorded_at: Utc::now(),
        },
    )
    .await?;

    tracing::info!(
        finger_id,
        confidence,
        authorized = verdict.authorized,
        prediction = %verdict.prediction,
        "Access registered",
    );

    Ok((
        StatusCode::CREATED,
        Json(AccessResponse {
            success: true,
            message: "Access registered",
            authorized: verdict.authorized,
            prediction: verdict.prediction,
        }),
    ))
}
