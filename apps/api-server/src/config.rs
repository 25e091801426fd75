//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
#[cfg(feature = "rate-limit")]
use std::time::Duration;

use blog_infra::auth::{DEFAULT_SECRET, JwtConfig};
use blog_infra::database::DatabaseConfig;
#[cfg(feature = "rate-limit")]
use blog_infra::rate_limit::RateLimitConfig;

/// Largest page size a client may request.
pub const DEFAULT_MAX_PER_PAGE: u64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Root of the public image store.
    pub storage_dir: PathBuf,
    pub max_per_page: u64,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let mut database = DatabaseConfig::new(url);
        database.max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", database.max_connections);
        database.min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", database.min_connections);

        let jwt_defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").unwrap_or(jwt_defaults.secret),
            expiration_hours: parse_or(&lookup, "JWT_EXPIRATION_HOURS", jwt_defaults.expiration_hours),
            issuer: lookup("JWT_ISSUER").unwrap_or(jwt_defaults.issuer),
        };
        if jwt.secret == DEFAULT_SECRET
            && lookup("RUST_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"))
        {
            tracing::error!("JWT_SECRET is not set in production; tokens can be forged");
        }

        #[cfg(feature = "rate-limit")]
        let rate_limit = {
            let defaults = RateLimitConfig::default();
            RateLimitConfig {
                max_requests: parse_or(&lookup, "RATE_LIMIT_MAX_REQUESTS", defaults.max_requests),
                window: Duration::from_secs(parse_or(
                    &lookup,
                    "RATE_LIMIT_WINDOW_SECS",
                    defaults.window.as_secs(),
                )),
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            database,
            jwt,
            storage_dir: lookup("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("storage/public")),
            max_per_page: parse_or(&lookup, "MAX_PER_PAGE", DEFAULT_MAX_PER_PAGE).max(1),
            #[cfg(feature = "rate-limit")]
            rate_limit,
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparseable configuration value");
            default
        }),
        None => default,
    }
}
