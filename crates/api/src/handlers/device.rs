//! Handlers for the sensor bridge's polling exchange (`/api/command`,
//! `/api/active_users`). These routes are not session-gated.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use biogate_core::command::DeviceCommand;
use biogate_core::roster::{join, RosterEntry};
use biogate_core::types::FingerId;
use biogate_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CommandUpdated {
    pub status: &'static str,
    pub command: DeviceCommand,
}

/// Body of `POST /api/active_users`. Without `ids` the roster is left as is.
#[derive(Debug, Deserialize)]
pub struct RosterUpdate {
    pub ids: Option<Vec<FingerId>>,
}

#[derive(Debug, Serialize)]
pub struct RosterUpdated {
    pub status: &'static str,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Command mailbox
// ---------------------------------------------------------------------------

/// GET /api/command
///
/// Plain-text `ACTION:ID`, e.g. `WAIT:0` or `DELETE:12`.
pub async fn get_command(State(state): State<AppState>) -> String {
    state.mailbox.wire().await
}

/// POST /api/command
///
/// Overwrite the pending command. Missing fields fall back to `wait` / `0`.
pub async fn set_command(
    State(state): State<AppState>,
    Json(command): Json<DeviceCommand>,
) -> Json<CommandUpdated> {
    if command.is_idle() {
        tracing::debug!("Mailbox reset to idle");
    } else {
        tracing::info!(command = %command, "Command queued for device");
    }
    state.mailbox.set(command.clone()).await;
    Json(CommandUpdated {
        status: "updated",
        command,
    })
}

// ---------------------------------------------------------------------------
// Active roster
// ---------------------------------------------------------------------------

/// GET /api/active_users
///
/// Enrolled slots joined with the directory; unknown slots are placeholders.
pub async fn list_active_users(State(state): State<AppState>) -> AppResult<Json<Vec<RosterEntry>>> {
    let ids = state.roster.ids().await;
    let mut directory: HashMap<FingerId, RosterEntry> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|user| {
            let entry = RosterEntry {
                id: user.id,
                name: user.name,
                role: user.role,
                is_active: user.is_active,
            };
            (entry.id, entry)
        })
        .collect();

    Ok(Json(join(&ids, |id| directory.remove(&id))))
}

/// POST /api/active_users
pub async fn replace_active_users(
    State(state): State<AppState>,
    Json(update): Json<RosterUpdate>,
) -> Json<RosterUpdated> {
    let count = match update.ids {
        Some(ids) => {
            let count = state.roster.replace(ids).await;
            tracing::info!(count, "Active roster synced");
            count
        }
        None => state.roster.ids().await.len(),
    };

    Json(RosterUpdated {
        status: "updated",
        count,
    })
}
