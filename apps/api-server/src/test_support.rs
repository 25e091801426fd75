//! Test fixtures: application state over an in-memory SQLite database.

use std::path::PathBuf;

use sea_orm::{ConnectOptions, Database};

use blog_infra::auth::JwtConfig;
use blog_infra::database::{DatabaseConfig, DatabaseConnections};
#[cfg(feature = "rate-limit")]
use blog_infra::rate_limit::RateLimitConfig;

use crate::config::AppConfig;
use crate::state::AppState;

pub fn test_config(storage_dir: PathBuf) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::new("sqlite::memory:"),
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "blog-test".to_string(),
        },
        storage_dir,
        max_per_page: 100,
        #[cfg(feature = "rate-limit")]
        rate_limit: RateLimitConfig::default(),
    }
}

/// Fresh state over its own in-memory database, plus the image storage root.
pub async fn test_state() -> (AppState, PathBuf) {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = DatabaseConnections::from_connection(Database::connect(opts).await.unwrap());
    db.create_schema().await.unwrap();

    let storage = std::env::temp_dir().join(format!("blog-api-test-{}", uuid::Uuid::new_v4()));
    let state = AppState::with_connections(db, &test_config(storage.clone()));
    (state, storage)
}
