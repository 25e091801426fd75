use chrono::{DateTime, Utc};

use super::user::Author;
use super::value_objects::CommentContent;

/// Comment entity - a reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: i32,
    content: CommentContent,
    author: Author,
    post_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment. The id stays 0 until the repository persists it.
    pub fn new(content: CommentContent, author: Author, post_id: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            content,
            author,
            post_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a persisted comment.
    pub fn restore(
        id: i32,
        content: CommentContent,
        author: Author,
        post_id: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            author,
            post_id,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn content(&self) -> &CommentContent {
        &self.content
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn post_id(&self) -> i32 {
        self.post_id
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

    pub fn update_content(&mut self, content: CommentContent) {
        self.content = content;
        self.touch();
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.author.id == user_id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}
