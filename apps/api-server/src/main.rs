//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::time::Duration;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blog_infra::database::PostgresRevokedTokenRepository;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

/// How often expired revocations and idle rate-limit keys are dropped.
const HOUSEKEEPING_INTERVAL: Duration = Duration::from_secs(600);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;
    tracing::info!("Starting Blog API Server on {}:{}", config.host, config.port);

    let state = AppState::init(&config).await?;

    #[cfg(feature = "rate-limit")]
    let limiter = std::sync::Arc::new(blog_infra::InMemoryRateLimiter::new(
        config.rate_limit.clone(),
    )?);
    #[cfg(feature = "rate-limit")]
    let auth_limiter = RateLimitMiddleware::new(limiter.clone());
    #[cfg(not(feature = "rate-limit"))]
    let auth_limiter = RateLimitMiddleware::disabled();

    let revoked = PostgresRevokedTokenRepository::new(state.db.main.clone());
    actix_rt::spawn(async move {
        let mut interval = actix_rt::time::interval(HOUSEKEEPING_INTERVAL);
        loop {
            interval.tick().await;
            match revoked.purge_expired().await {
                Ok(purged) => tracing::debug!(purged, "Purged expired token revocations"),
                Err(e) => tracing::warn!(error = %e, "Failed to purge token revocations"),
            }
            #[cfg(feature = "rate-limit")]
            limiter.purge_idle();
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, auth_limiter.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod test_support;
