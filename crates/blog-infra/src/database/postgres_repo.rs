//! User and token-revocation repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use blog_core::domain::User;
use blog_core::error::RepoError;
use blog_core::ports::{RevokedTokenRepository, UserRepository};

use super::connections::SharedConn;
use super::entity::revoked_token::{self, Entity as RevokedTokenEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// Mask an email address for logging to avoid PII in logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}@{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// Revoked token denylist stored in `revoked_tokens`.
pub struct PostgresRevokedTokenRepository {
    db: SharedConn,
}

impl PostgresRevokedTokenRepository {
    pub fn new(db: impl Into<SharedConn>) -> Self {
        Self { db: db.into() }
    }

    /// Drop entries whose token would have expired anyway.
    pub async fn purge_expired(&self) -> Result<u64, RepoError> {
        let now: DateTime<Utc> = Utc::now();
        let result = RevokedTokenEntity::delete_many()
            .filter(revoked_token::Column::ExpiresAt.lt(now))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl RevokedTokenRepository for PostgresRevokedTokenRepository {
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), RepoError> {
        let row = revoked_token::ActiveModel {
            jti: Set(jti.to_owned()),
            expires_at: Set(expires_at.into()),
        };

        // Logging out twice with the same token is not an error.
        RevokedTokenEntity::insert(row)
            .on_conflict(
                OnConflict::column(revoked_token::Column::Jti)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, RepoError> {
        let found = RevokedTokenEntity::find_by_id(jti.to_owned())
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(found.is_some())
    }
}
