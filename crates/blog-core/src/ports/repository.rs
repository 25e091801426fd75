use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, Post, User};
use crate::error::RepoError;
use crate::pagination::Page;

/// How much of a post's object graph a query materializes.
///
/// The author is always loaded. Comments (with their authors) cost an extra
/// round trip and are only loaded for [`Hydration::Full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Post and author only; `Post::comments()` reports a missing relation.
    Shallow,
    /// Post, author, and every comment with its author.
    Full,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity (id 0) or update an existing one.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns whether a row was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post persistence boundary.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32, hydration: Hydration) -> Result<Option<Post>, RepoError>;

    /// Newest posts first, fully hydrated. `page` is 1-based.
    async fn find_all_paginated(&self, per_page: u64, page: u64) -> Result<Page<Post>, RepoError>;

    /// Insert a new post and return it reloaded with its relations.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Persist title, content and image of an existing post.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}

/// Comment persistence boundary.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError>;

    /// Comments of a post, oldest first.
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;

    /// Insert a new comment and return it with its assigned id.
    async fn save(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}

/// Denylist of bearer tokens invalidated by logout.
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync {
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), RepoError>;

    async fn is_revoked(&self, jti: &str) -> Result<bool, RepoError>;
}
