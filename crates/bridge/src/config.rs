use std::path::PathBuf;
use std::time::Duration;

use crate::error::BridgeError;

/// Default backend base URL (the API's default bind port).
const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
/// Default delay between mailbox polls.
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
/// Default per-request HTTP timeout.
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 500;
/// The ESP32 resets when the port opens; give it time to boot.
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Bridge configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Serial device, e.g. `/dev/ttyUSB0`.
    pub serial_port: PathBuf,
    /// API base URL without a trailing slash.
    pub backend_url: String,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                 |
    /// |--------------------|----------|-------------------------|
    /// | `SERIAL_PORT`      | **yes**  | --                      |
    /// | `BACKEND_URL`      | no       | `http://localhost:5000` |
    /// | `POLL_INTERVAL_MS` | no       | `1000`                  |
    /// | `HTTP_TIMEOUT_MS`  | no       | `500`                   |
    pub fn from_env() -> Result<Self, BridgeError> {
        let serial_port = std::env::var("SERIAL_PORT")
            .map_err(|_| BridgeError::Config("SERIAL_PORT is required".into()))?;

        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.into())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            serial_port: PathBuf::from(serial_port),
            backend_url,
            poll_interval: Duration::from_millis(millis("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?),
            http_timeout: Duration::from_millis(millis("HTTP_TIMEOUT_MS", DEFAULT_HTTP_TIMEOUT_MS)?),
        })
    }
}

fn millis(key: &str, default: u64) -> Result<u64, BridgeError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BridgeError::Config(format!("{key} must be a number of milliseconds"))),
        Err(_) => Ok(default),
    }
}
