//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded). Unset variables fall back to defaults; malformed values are
//! startup errors.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use mission::MissionConfig;
use platform::middleware::CorsConfig;
use platform::rate_limit::RateLimitConfig;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// `None` selects the seeded in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub rate_limit: RateLimitConfig,
    pub mission: MissionConfig,
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = match (get("LISTEN_ADDR"), get("PORT")) {
            (Some(addr), _) => parse_var("LISTEN_ADDR", &addr)?,
            (None, Some(port)) => {
                let port: u16 = parse_var("PORT", &port)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => parse_var("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
        };

        let database_max_connections = get("DATABASE_MAX_CONNECTIONS")
            .map(|v| parse_var("DATABASE_MAX_CONNECTIONS", &v))
            .transpose()?
            .unwrap_or(5);

        let mut rate_limit = RateLimitConfig::default();
        if let Some(v) = get("RATE_LIMIT_MAX_REQUESTS") {
            rate_limit.max_requests = parse_var("RATE_LIMIT_MAX_REQUESTS", &v)?;
        }
        if let Some(v) = get("RATE_LIMIT_WINDOW_SECS") {
            let secs: u64 = parse_var("RATE_LIMIT_WINDOW_SECS", &v)?;
            anyhow::ensure!(secs > 0, "RATE_LIMIT_WINDOW_SECS must be positive");
            rate_limit.window = Duration::from_secs(secs);
        }

        let mut mission = MissionConfig::default();
        if let Some(v) = get("LIST_TIMEOUT_MS") {
            let ms: u64 = parse_var("LIST_TIMEOUT_MS", &v)?;
            mission.list_timeout = Duration::from_millis(ms);
        }

        let cors = match get("CORS_ALLOW_ORIGIN") {
            Some(origin) => CorsConfig::with_origin(
                HeaderValue::from_str(origin.trim())
                    .with_context(|| format!("CORS_ALLOW_ORIGIN is not a valid header: {origin}"))?,
            ),
            None => CorsConfig::default(),
        };

        Ok(Self {
            listen_addr,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            rate_limit,
            mission,
            cors,
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value for {key}: {raw:?}"))
}
