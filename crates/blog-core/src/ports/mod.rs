//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod rate_limit;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use rate_limit::{RateLimitResult, RateLimiter};
pub use repository::{
    BaseRepository, CommentRepository, Hydration, PostRepository, RevokedTokenRepository,
    UserRepository,
};
pub use storage::{ImageStorage, ImageUpload, StorageError};
