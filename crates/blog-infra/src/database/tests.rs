use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, Hydration, PostRepository};

use crate::database::DatabaseConnections;
use crate::database::comment_repo::PostgresCommentRepository;
use crate::database::entity::{comment, post, user};
use crate::database::post_repo::PostgresPostRepository;

fn at(minute: u32) -> sea_orm::prelude::DateTimeWithTimeZone {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0)
        .unwrap()
        .into()
}

fn user_row(id: i32) -> user::Model {
    user::Model {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        password_hash: "hash".to_owned(),
        created_at: at(0),
        updated_at: at(0),
    }
}

fn post_row(id: i32, user_id: i32) -> post::Model {
    post::Model {
        id,
        user_id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        image_path: None,
        created_at: at(1),
        updated_at: at(1),
    }
}

fn comment_row(id: i32, post_id: i32, user_id: i32, minute: u32) -> comment::Model {
    comment::Model {
        id,
        post_id,
        user_id,
        content: format!("Comment {id}"),
        created_at: at(minute),
        updated_at: at(minute),
    }
}

#[tokio::test]
async fn test_find_post_by_id_shallow() {
    // posts -> users
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(7, 1)]])
        .append_query_results([vec![user_row(1)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo
        .find_by_id(7, Hydration::Shallow)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(post.id(), 7);
    assert_eq!(post.title().as_str(), "Test Post");
    assert_eq!(post.author().name, "User 1");
    assert!(!post.has_comments_loaded());
}

#[tokio::test]
async fn test_find_post_by_id_full_loads_comment_authors() {
    // posts -> comments -> users
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(7, 1)]])
        .append_query_results([vec![comment_row(1, 7, 2, 5), comment_row(2, 7, 1, 6)]])
        .append_query_results([vec![user_row(1), user_row(2)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.find_by_id(7, Hydration::Full).await.unwrap().unwrap();

    let comments = post.comments().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id(), 1);
    assert_eq!(comments[0].author().id, 2);
    assert_eq!(comments[1].author().id, 1);
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(
        repo.find_by_id(99, Hydration::Full)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_post_without_author_row_is_reported() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(7, 3)]])
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let err = repo.find_by_id(7, Hydration::Shallow).await.unwrap_err();

    assert!(matches!(err, RepoError::MissingRelation("author")));
}

#[tokio::test]
async fn test_delete_post_reports_rows_affected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.delete(7).await.unwrap());
    assert!(!repo.delete(7).await.unwrap());
}

#[tokio::test]
async fn test_find_comments_by_post_id_keeps_query_order() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![comment_row(4, 7, 1, 2), comment_row(9, 7, 1, 8)]])
            .append_query_results([vec![user_row(1)]])
            .into_connection(),
    );

    let repo = PostgresCommentRepository::new(Arc::clone(&db));
    let comments = repo.find_by_post_id(7).await.unwrap();
    assert_eq!(
        comments.iter().map(|c| c.id()).collect::<Vec<_>>(),
        vec![4, 9]
    );
    drop(repo);

    // The comment query must ask for oldest first.
    let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("ORDER BY"));
    assert!(sql.contains("ASC"));
    assert!(!sql.contains("DESC"));
}

#[tokio::test]
async fn test_mock_connection_is_shared_between_repositories() {
    let conn = DatabaseConnections::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_row(7, 1)]])
            .append_query_results([vec![user_row(1)]])
            .append_query_results([vec![comment_row(4, 7, 1, 2)]])
            .append_query_results([vec![user_row(1)]])
            .into_connection(),
    );
    let handle = conn.clone();

    let posts = PostgresPostRepository::new(conn.main.clone());
    let comments = PostgresCommentRepository::new(handle.main.clone());

    let post = posts.find_by_id(7, Hydration::Shallow).await.unwrap().unwrap();
    let found = comments.find_by_post_id(post.id()).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(Arc::strong_count(&conn.main), 4);
}
