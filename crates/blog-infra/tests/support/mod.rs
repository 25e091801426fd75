//! Shared fixtures for the SQLite-backed integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sea_orm::{ConnectOptions, Database};

use blog_core::domain::{Author, Post, PostContent, PostTitle, User};
use blog_core::ports::{BaseRepository, PostRepository};
use blog_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresRevokedTokenRepository, PostgresUserRepository,
};

pub struct TestDb {
    pub conn: DatabaseConnections,
    pub users: Arc<PostgresUserRepository>,
    pub posts: Arc<PostgresPostRepository>,
    pub comments: Arc<PostgresCommentRepository>,
    pub revoked: Arc<PostgresRevokedTokenRepository>,
}

/// Fresh in-memory database with the schema created from the entities.
pub async fn setup() -> TestDb {
    // A single connection keeps every query on the same in-memory database.
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.unwrap();
    let conn = DatabaseConnections::from_connection(db);
    conn.create_schema().await.unwrap();

    TestDb {
        users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
        posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
        comments: Arc::new(PostgresCommentRepository::new(conn.main.clone())),
        revoked: Arc::new(PostgresRevokedTokenRepository::new(conn.main.clone())),
        conn,
    }
}

pub fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + TimeDelta::minutes(minute)
}

impl TestDb {
    pub async fn user(&self, name: &str) -> User {
        let user = User::new(
            name.to_owned(),
            format!("{}@example.com", name.to_lowercase()),
            "hash".to_owned(),
        );
        self.users.save(user).await.unwrap()
    }

    /// Insert a post with an explicit creation time.
    pub async fn post_at(&self, author: &Author, title: &str, minute: i64) -> Post {
        let post = Post::new(
            PostTitle::new(title).unwrap(),
            PostContent::new("Body").unwrap(),
            None,
            author.clone(),
            at(minute),
        );
        self.posts.save(post).await.unwrap()
    }
}
