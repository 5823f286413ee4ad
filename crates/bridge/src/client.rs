//! Backend seam used by the relay loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::error::BridgeError;

/// The four API calls the bridge makes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Report a scan result. The API answers 201 on success.
    async fn post_access(&self, payload: &Value) -> Result<(), BridgeError>;

    /// Replace the API's view of the enrolled slots.
    async fn post_active_users(&self, payload: &Value) -> Result<(), BridgeError>;

    /// Fetch the pending command in `ACTION:ID` form.
    async fn poll_command(&self) -> Result<String, BridgeError>;

    /// Put the mailbox back to `WAIT:0` after a command was delivered.
    async fn reset_command(&self) -> Result<(), BridgeError>;
}

/// [`Backend`] talking to a running Biogate API over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Every request is bounded by `timeout` so a slow API cannot stall
    /// the serial loop.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn expect_status(
    endpoint: &'static str,
    response: &reqwest::Response,
    expected: StatusCode,
) -> Result<(), BridgeError> {
    let status = response.status();
    if status != expected {
        return Err(BridgeError::Status {
            endpoint,
            status: status.as_u16(),
        });
    }
    Ok(())
}

#[async_trait]
impl Backend for HttpBackend {
    async fn post_access(&self, payload: &Value) -> Result<(), BridgeError> {
        let response = self.client.post(self.url("/access")).json(payload).send().await?;
        expect_status("/access", &response, StatusCode::CREATED)
    }

    async fn post_active_users(&self, payload: &Value) -> Result<(), BridgeError> {
        let response = self
            .client
            .post(self.url("/api/active_users"))
            .json(payload)
            .send()
            .await?;
        expect_status("/api/active_users", &response, StatusCode::OK)
    }

    async fn poll_command(&self) -> Result<String, BridgeError> {
        let response = self.client.get(self.url("/api/command")).send().await?;
        expect_status("/api/command", &response, StatusCode::OK)?;
        Ok(response.text().await?.trim().to_string())
    }

    async fn reset_command(&self) -> Result<(), BridgeError> {
        let response = self
            .client
            .post(self.url("/api/command"))
            .json(&json!({ "action": "wait", "id": 0 }))
            .send()
            .await?;
        expect_status("/api/command", &response, StatusCode::OK)
    }
}
