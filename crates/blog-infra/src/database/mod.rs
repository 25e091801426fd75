//! Database connection management and SeaORM repositories.

mod comment_repo;
mod connections;
mod hydrate;
mod post_repo;
mod postgres_base;
mod postgres_repo;

pub mod entity;

pub use comment_repo::PostgresCommentRepository;
pub use connections::{DatabaseConfig, DatabaseConnections, SharedConn};
pub use post_repo::PostgresPostRepository;
pub use postgres_repo::{PostgresRevokedTokenRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
