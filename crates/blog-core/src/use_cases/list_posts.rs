use std::sync::Arc;

use crate::domain::Post;
use crate::error::DomainError;
use crate::pagination::Page;
use crate::ports::PostRepository;

/// List posts newest first, one page at a time.
#[derive(Clone)]
pub struct ListPostsUseCase {
    posts: Arc<dyn PostRepository>,
}

impl ListPostsUseCase {
    pub const DEFAULT_PER_PAGE: u64 = 10;

    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// `page` is 1-based.
    pub async fn execute(&self, per_page: u64, page: u64) -> Result<Page<Post>, DomainError> {
        Ok(self.posts.find_all_paginated(per_page, page).await?)
    }
}
