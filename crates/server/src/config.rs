//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `WEB_LABS_HOST` - Bind address (default: 127.0.0.1)
//! - `WEB_LABS_PORT` - Listen port (default: 3000)
//! - `WEB_LABS_BASE_URL` - Public URL (default: `http://{host}:{port}`)
//! - `WEB_LABS_SESSION_TTL_SECONDS` - Session inactivity expiry (default: 7 days)
//! - `WEB_LABS_REMEMBER_DAYS` - Remember-me token lifetime (default: 365)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3000;

/// Session expiry time in seconds (7 days).
const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Remember-me cookie lifetime in days.
const DEFAULT_REMEMBER_DAYS: i64 = 365;

/// Upper bound for the remember-me lifetime (100 years).
const MAX_REMEMBER_DAYS: i64 = 36_500;

/// Upper bound for the session inactivity expiry (100 years).
const MAX_SESSION_TTL_SECONDS: i64 = MAX_REMEMBER_DAYS * 24 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web Labs server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL; an `https://` URL turns on secure cookies
    pub base_url: String,
    /// Session inactivity expiry in seconds
    pub session_ttl_seconds: i64,
    /// Lifetime of remember-me tokens in days
    pub remember_days: i64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "WEB_LABS_HOST", DEFAULT_HOST)?;
        let port = parse_or(&lookup, "WEB_LABS_PORT", DEFAULT_PORT)?;
        let base_url = lookup("WEB_LABS_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://{host}:{port}"));

        let session_ttl_seconds = parse_bounded(
            &lookup,
            "WEB_LABS_SESSION_TTL_SECONDS",
            DEFAULT_SESSION_TTL_SECONDS,
            MAX_SESSION_TTL_SECONDS,
        )?;
        let remember_days = parse_bounded(
            &lookup,
            "WEB_LABS_REMEMBER_DAYS",
            DEFAULT_REMEMBER_DAYS,
            MAX_REMEMBER_DAYS,
        )?;

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate(&lookup, "SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            base_url,
            session_ttl_seconds,
            remember_days,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns true if cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let host = DEFAULT_HOST;
        Self {
            host,
            port: DEFAULT_PORT,
            base_url: format!("http://{host}:{DEFAULT_PORT}"),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            remember_days: DEFAULT_REMEMBER_DAYS,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Parse an integer variable in `1..=max`.
fn parse_bounded<F>(lookup: &F, key: &str, default: i64, max: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, key, default)?;
    if !(1..=max).contains(&value) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 1 and {max} (got {value})"),
        ));
    }
    Ok(value)
}

/// Parse a sample rate in `[0.0, 1.0]`.
fn parse_rate<F>(lookup: &F, key: &str, default: f32) -> Result<f32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, key, default)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {value})"),
        ));
    }
    Ok(value)
}
