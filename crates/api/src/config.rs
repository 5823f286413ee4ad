use biogate_core::access::{
    AccessPolicy, DEFAULT_ALERT_BELOW_CONFIDENCE, DEFAULT_EMPLOYEE_MIN_CONFIDENCE,
    DEFAULT_UTC_OFFSET_HOURS, DEFAULT_VISITOR_HOURS,
};

use crate::auth::session::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for a
/// single-site deployment next to the sensor bridge.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`, the port the bridge targets).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite database URL (default: `sqlite://biometrie.db`).
    pub database_url: String,
    /// Session cookie and token settings.
    pub session: SessionConfig,
    /// Operator account created when no operator exists yet.
    pub bootstrap_admin: BootstrapAdmin,
    /// Thresholds of the access decision engine.
    pub policy: AccessPolicy,
}

/// Credentials of the operator seeded on first start.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | `sqlite://biometrie.db`    |
    /// | `ADMIN_USERNAME`       | `admin`                    |
    /// | `ADMIN_PASSWORD`       | `admin`                    |
    ///
    /// Session and policy variables are documented on
    /// [`SessionConfig::from_env`] and [`policy_from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://biometrie.db".into());

        let bootstrap_admin = BootstrapAdmin {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            session: SessionConfig::from_env(),
            bootstrap_admin,
            policy: policy_from_env(),
        }
    }
}

/// Load the access policy from environment variables.
///
/// | Env Var                          | Default |
/// |----------------------------------|---------|
/// | `POLICY_EMPLOYEE_MIN_CONFIDENCE` | `80`    |
/// | `POLICY_ALERT_BELOW_CONFIDENCE`  | `50`    |
/// | `POLICY_VISITOR_START_HOUR`      | `8`     |
/// | `POLICY_VISITOR_END_HOUR`        | `18`    |
/// | `POLICY_UTC_OFFSET_HOURS`        | `1`     |
///
/// # Panics
///
/// Panics if a value does not parse or the resulting policy is invalid.
pub fn policy_from_env() -> AccessPolicy {
    let employee_min_confidence: i64 = env_or(
        "POLICY_EMPLOYEE_MIN_CONFIDENCE",
        DEFAULT_EMPLOYEE_MIN_CONFIDENCE,
    );
    let alert_below_confidence: i64 =
        env_or("POLICY_ALERT_BELOW_CONFIDENCE", DEFAULT_ALERT_BELOW_CONFIDENCE);
    let visitor_start: u32 = env_or("POLICY_VISITOR_START_HOUR", DEFAULT_VISITOR_HOURS.start);
    let visitor_end: u32 = env_or("POLICY_VISITOR_END_HOUR", DEFAULT_VISITOR_HOURS.end);
    let utc_offset_hours: i32 = env_or("POLICY_UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS);

    AccessPolicy::new(
        employee_min_confidence,
        alert_below_confidence,
        visitor_start..visitor_end,
        utc_offset_hours,
    )
    .unwrap_or_else(|e| panic!("Invalid access policy: {e}"))
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + ToString,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{key} must be a valid number"))
}
