use std::sync::Arc;

use chrono::Utc;

use crate::commands::CreatePostCommand;
use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{PostRepository, UserRepository};

/// Publish a new post for an existing user.
#[derive(Clone)]
pub struct CreatePostUseCase {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl CreatePostUseCase {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub async fn execute(&self, command: CreatePostCommand) -> Result<Post, DomainError> {
        let author_id = command.author_id();
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", author_id))?;

        let (title, content, image_path) = command.into_parts();
        let post = Post::new(title, content, image_path, author.author(), Utc::now());

        Ok(self.posts.save(post).await?)
    }
}
