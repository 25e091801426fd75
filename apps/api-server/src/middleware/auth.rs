//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;

use blog_core::ports::{AuthError, RevokedTokenRepository, TokenClaims, TokenService};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
///
/// The bearer token must be valid, unexpired and not revoked by a logout.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub email: String,
    /// Token id, needed to revoke this token on logout.
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            expires_at: claims.expires_at(),
            user_id: claims.user_id,
            email: claims.email,
            jti: claims.jti,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };

            let claims = state.tokens.validate_token(&token?)?;
            if state.revoked_tokens.is_revoked(&claims.jti).await? {
                tracing::debug!(user_id = claims.user_id, "Rejected revoked token");
                return Err(AuthError::TokenRevoked.into());
            }

            Ok(Identity::from(claims))
        })
    }
}
