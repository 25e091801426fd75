//! Signed session tokens (HS256).
//!
//! Every token carries a random `jti` so a single session can be revoked on
//! logout without touching the user's other sessions.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::ports::{AuthError, TokenClaims, TokenService};

/// Secret used when `JWT_SECRET` is not configured.
pub const DEFAULT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Session lifetime. Negative values produce already-expired tokens.
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "blog-api".to_string(),
        }
    }
}

/// Wire form of the payload.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// User id, as a string per RFC 7519.
    sub: String,
    email: String,
    jti: String,
    iss: String,
    iat: i64,
    exp: i64,
}

impl TryFrom<SessionClaims> for TokenClaims {
    type Error = AuthError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken(format!("bad subject `{}`", claims.sub)))?;

        Ok(TokenClaims {
            user_id,
            email: claims.email,
            jti: claims.jti,
            exp: claims.exp,
        })
    }
}

fn rejection(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken(err.to_string()),
    }
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: TimeDelta,
    issuer: String,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        if config.secret == DEFAULT_SECRET {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime: TimeDelta::try_hours(config.expiration_hours).unwrap_or_else(|| TimeDelta::hours(24)),
            issuer: config.issuer,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: i32, email: &str) -> Result<String, AuthError> {
        let issued_at = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.lifetime).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(rejection)?
            .claims
            .try_into()
    }

    fn expiration_seconds(&self) -> i64 {
        self.lifetime.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(expiration_hours: i64, issuer: &str) -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours,
            issuer: issuer.to_string(),
        })
    }

    #[test]
    fn test_issued_token_validates() {
        let tokens = service(1, "blog-test");

        let token = tokens.generate_token(42, "ada@example.com").unwrap();
        let claims = tokens.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "ada@example.com");
        assert!(Uuid::parse_str(&claims.jti).is_ok());
        assert!(claims.expires_at() > Utc::now());
    }

    #[test]
    fn test_sessions_are_distinguishable() {
        let tokens = service(1, "blog-test");

        let first = tokens.generate_token(1, "a@b.c").unwrap();
        let second = tokens.generate_token(1, "a@b.c").unwrap();

        assert_ne!(
            tokens.validate_token(&first).unwrap().jti,
            tokens.validate_token(&second).unwrap().jti
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = service(1, "blog-test").validate_token("not.a.jwt");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let token = service(1, "someone-else").generate_token(1, "a@b.c").unwrap();
        assert!(service(1, "blog-test").validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_session() {
        let tokens = service(-2, "blog-test");
        let token = tokens.generate_token(1, "old@example.com").unwrap();

        assert!(matches!(
            tokens.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_expiration_seconds() {
        assert_eq!(service(24, "blog-test").expiration_seconds(), 86_400);
    }
}
