//! Operator sessions.
//!
//! A session is an HS256-signed JWT carried in an `HttpOnly` cookie. Scripted
//! clients may send the same token as `Authorization: Bearer <token>`.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use biogate_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session lifetime in hours.
const DEFAULT_TTL_HOURS: i64 = 12;

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "biogate_session";

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the operator's database id.
    pub sub: DbId,
    pub username: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Session token and cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours.
    pub ttl_hours: i64,
    pub cookie_name: String,
    /// Add the `Secure` attribute (set when served over HTTPS).
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default           |
    /// |-------------------------|----------|-------------------|
    /// | `SESSION_SECRET`        | **yes**  | --                |
    /// | `SESSION_TTL_HOURS`     | no       | `12`              |
    /// | `SESSION_COOKIE_NAME`   | no       | `biogate_session` |
    /// | `SESSION_COOKIE_SECURE` | no       | `false`           |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.into());

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            secret,
            ttl_hours,
            cookie_name,
            cookie_secure,
        }
    }

    fn max_age_secs(&self) -> i64 {
        self.ttl_hours * 3600
    }
}

/// Sign a session token for the given operator.
pub fn issue_session_token(
    admin_id: DbId,
    username: &str,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: admin_id,
        username: username.to_string(),
        exp: now + config.max_age_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token (signature and expiry).
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// `Set-Cookie` value that stores `token` for the session lifetime.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        config.cookie_name,
        config.max_age_secs()
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        config.cookie_name
    )
}

/// Find the session token in a request: Bearer header first, then cookie.
pub fn token_from_headers<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value)
}
