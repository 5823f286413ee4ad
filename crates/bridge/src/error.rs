use std::io;

/// Failures inside the bridge.
///
/// Only [`BridgeError::Link`] ends a relay session; everything else is
/// logged and the loop carries on.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The serial device could not be opened, read, or written.
    #[error("serial link error: {0}")]
    Link(#[from] io::Error),

    /// The backend could not be reached.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an unexpected status.
    #[error("{endpoint} answered {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// A tagged line carried invalid JSON.
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Missing or malformed environment configuration.
    #[error("configuration error: {0}")]
    Config(String),
}
