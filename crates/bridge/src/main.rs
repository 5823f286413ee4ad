//! `biogate-bridge` -- serial relay between the fingerprint sensor and
//! the Biogate API.
//!
//! Forwards scan results and enrolled-slot reports from the device to the
//! API, and delivers pending mailbox commands (e.g. `DELETE:12`) back to
//! the device.
//!
//! # Environment variables
//!
//! | Variable           | Required | Default                 | Description                         |
//! |--------------------|----------|-------------------------|-------------------------------------|
//! | `SERIAL_PORT`      | yes      | --                      | Serial device, e.g. `/dev/ttyUSB0`  |
//! | `BACKEND_URL`      | no       | `http://localhost:5000` | Base URL of the API                 |
//! | `POLL_INTERVAL_MS` | no       | `1000`                  | Milliseconds between mailbox polls  |
//! | `HTTP_TIMEOUT_MS`  | no       | `500`                   | Per-request HTTP timeout            |
//! | `LOG_FORMAT`       | no       | --                      | `json` for JSON log lines           |

use biogate_bridge::client::HttpBackend;
use biogate_bridge::config::BridgeConfig;
use biogate_bridge::relay;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "biogate_bridge=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let config = BridgeConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid bridge configuration");
        std::process::exit(1);
    });

    tracing::info!(
        port = %config.serial_port.display(),
        backend = %config.backend_url,
        poll_ms = config.poll_interval.as_millis() as u64,
        "Starting biogate-bridge",
    );

    let backend = HttpBackend::new(config.backend_url.clone(), config.http_timeout)
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        });

    relay::run(&config.serial_port, config.poll_interval, &backend).await;
}
