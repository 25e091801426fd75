//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    ImageStorage, PasswordService, RevokedTokenRepository, TokenService, UserRepository,
};
use blog_core::use_cases::{AddCommentUseCase, CreatePostUseCase, ListPostsUseCase};
use blog_infra::LocalImageStorage;
use blog_infra::auth::{Argon2PasswordService, JwtTokenService};
use blog_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresRevokedTokenRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnections,
    pub users: Arc<dyn UserRepository>,
    pub revoked_tokens: Arc<dyn RevokedTokenRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub images: Arc<dyn ImageStorage>,
    pub create_post: CreatePostUseCase,
    pub add_comment: AddCommentUseCase,
    pub list_posts: ListPostsUseCase,
    pub max_per_page: u64,
}

impl AppState {
    /// Connect to the database and build the application state.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = DatabaseConnections::init(&config.database).await?;
        Ok(Self::with_connections(db, config))
    }

    /// Wire repositories, services and use cases over an open connection.
    pub fn with_connections(db: DatabaseConnections, config: &AppConfig) -> Self {
        let users = Arc::new(PostgresUserRepository::new(db.main.clone()));
        let posts = Arc::new(PostgresPostRepository::new(db.main.clone()));
        let comments = Arc::new(PostgresCommentRepository::new(db.main.clone()));

        tracing::info!(
            storage_dir = %config.storage_dir.display(),
            max_per_page = config.max_per_page,
            "Application state initialized"
        );

        Self {
            revoked_tokens: Arc::new(PostgresRevokedTokenRepository::new(db.main.clone())),
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            images: Arc::new(LocalImageStorage::new(&config.storage_dir)),
            create_post: CreatePostUseCase::new(posts.clone(), users.clone()),
            add_comment: AddCommentUseCase::new(comments, posts.clone(), users.clone()),
            list_posts: ListPostsUseCase::new(posts),
            users,
            max_per_page: config.max_per_page,
            db,
        }
    }
}
