use chrono::{DateTime, Utc};

use super::comment::Comment;
use super::user::Author;
use super::value_objects::{PostContent, PostTitle};
use crate::error::DomainError;

/// Post entity - a blog post with its author and discussion thread.
///
/// `comments` is `None` when the post was loaded without its comment
/// collection (see [`crate::ports::Hydration`]); reading it then fails with
/// [`DomainError::MissingRelation`] instead of silently looking empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: i32,
    title: PostTitle,
    content: PostContent,
    image_path: Option<String>,
    author: Author,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    comments: Option<Vec<Comment>>,
}

impl Post {
    /// Create a new post. The id stays 0 until the repository persists it.
    pub fn new(
        title: PostTitle,
        content: PostContent,
        image_path: Option<String>,
        author: Author,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            title,
            content,
            image_path,
            author,
            created_at: now,
            updated_at: now,
            comments: Some(Vec::new()),
        }
    }

    /// Rebuild a persisted post. Pass `comments: None` when they were not loaded.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: i32,
        title: PostTitle,
        content: PostContent,
        image_path: Option<String>,
        author: Author,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        comments: Option<Vec<Comment>>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            image_path,
            author,
            created_at,
            updated_at: updated_at.max(created_at),
            comments,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    pub fn content(&self) -> &PostContent {
        &self.content
    }

    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Comments in chronological order.
    pub fn comments(&self) -> Result<&[Comment], DomainError> {
        self.comments
            .as_deref()
            .ok_or(DomainError::MissingRelation("comments"))
    }

    pub fn has_comments_loaded(&self) -> bool {
        self.comments.is_some()
    }

    pub fn update_title(&mut self, title: PostTitle) {
        self.title = title;
        self.touch();
    }

    pub fn update_content(&mut self, content: PostContent) {
        self.content = content;
        self.touch();
    }

    pub fn update_image(&mut self, image_path: Option<String>) {
        self.image_path = image_path;
        self.touch();
    }

    /// Append a comment to the thread.
    pub fn add_comment(&mut self, comment: Comment) -> Result<(), DomainError> {
        if comment.post_id() != self.id {
            return Err(DomainError::ForeignComment {
                expected: self.id,
                found: comment.post_id(),
            });
        }
        self.comments
            .as_mut()
            .ok_or(DomainError::MissingRelation("comments"))?
            .push(comment);
        Ok(())
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.author.id == user_id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}
