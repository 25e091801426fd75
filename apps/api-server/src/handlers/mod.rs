//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes.
///
/// `auth_limiter` throttles the `/api/auth` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig, auth_limiter: RateLimitMiddleware) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .wrap(auth_limiter)
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me))
                    .route("/logout", web::post().to(auth::logout)),
            )
            // Authenticated routes; handlers require an `Identity`.
            .route("/posts", web::get().to(posts::index))
            .route("/posts", web::post().to(posts::store))
            .route(
                "/posts/{post_id}/comments",
                web::post().to(comments::store),
            ),
    );
}

#[cfg(test)]
mod tests;
