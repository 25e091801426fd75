use std::sync::Arc;

use chrono::Utc;

use crate::commands::AddCommentCommand;
use crate::domain::Comment;
use crate::error::DomainError;
use crate::ports::{CommentRepository, Hydration, PostRepository, UserRepository};

/// Add a comment to an existing post.
#[derive(Clone)]
pub struct AddCommentUseCase {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl AddCommentUseCase {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    pub async fn execute(&self, command: AddCommentCommand) -> Result<Comment, DomainError> {
        let post_id = command.post_id();
        // Existence check only; the thread itself is not needed.
        self.posts
            .find_by_id(post_id, Hydration::Shallow)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        let author_id = command.author_id();
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", author_id))?;

        let comment = Comment::new(command.into_content(), author.author(), post_id, Utc::now());

        Ok(self.comments.save(comment).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::fakes::{InMemoryComments, InMemoryPosts, InMemoryUsers};

    fn use_case(
        posts: Arc<InMemoryPosts>,
        comments: Arc<InMemoryComments>,
        users: Arc<InMemoryUsers>,
    ) -> AddCommentUseCase {
        AddCommentUseCase::new(comments, posts, users)
    }

    #[tokio::test]
    async fn test_adds_comment_to_existing_post() {
        let users = Arc::new(InMemoryUsers::with_user(1, "Ada"));
        let posts = Arc::new(InMemoryPosts::default());
        let post_id = posts.seed(users.author(1)).await;
        let comments = Arc::new(InMemoryComments::default());

        let command = AddCommentCommand::new("Nice!", post_id, 1).unwrap();
        let comment = use_case(posts, comments.clone(), users)
            .execute(command)
            .await
            .unwrap();

        assert!(comment.id() > 0);
        assert_eq!(comment.post_id(), post_id);
        assert_eq!(comment.content().as_str(), "Nice!");
        assert_eq!(comments.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_post_fails_without_writing() {
        let users = Arc::new(InMemoryUsers::with_user(1, "Ada"));
        let posts = Arc::new(InMemoryPosts::default());
        let comments = Arc::new(InMemoryComments::default());

        let command = AddCommentCommand::new("Hello?", 404, 1).unwrap();
        let err = use_case(posts, comments.clone(), users)
            .execute(command)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { resource: "post", id: 404 }));
        assert_eq!(comments.len(), 0);
    }

    #[tokio::test]
    async fn test_missing_author_fails_without_writing() {
        let users = Arc::new(InMemoryUsers::with_user(1, "Ada"));
        let posts = Arc::new(InMemoryPosts::default());
        let post_id = posts.seed(users.author(1)).await;
        let comments = Arc::new(InMemoryComments::default());

        let command = AddCommentCommand::new("Hi", post_id, 2).unwrap();
        let err = use_case(posts, comments.clone(), users)
            .execute(command)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { resource: "user", id: 2 }));
        assert_eq!(comments.len(), 0);
    }
}
