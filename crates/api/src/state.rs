use std::sync::Arc;

use crate::config::ServerConfig;
use crate::device::{ActiveRoster, CommandMailbox};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: biogate_db::DbPool,
    /// Server configuration (session settings, access policy).
    pub config: Arc<ServerConfig>,
    /// Pending instruction for the sensor.
    pub mailbox: Arc<CommandMailbox>,
    /// Slots the sensor last reported as enrolled.
    pub roster: Arc<ActiveRoster>,
}

impl AppState {
    /// Fresh state with an idle mailbox and an empty roster.
    pub fn new(pool: biogate_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            mailbox: Arc::new(CommandMailbox::new()),
            roster: Arc::new(ActiveRoster::new()),
        }
    }
}
