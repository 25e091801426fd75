//! Cached feed of posts and their comments.

use blog_shared::dto::{CommentDto, PageMeta, PostDto};

use crate::api::{ApiClient, NewPost};
use crate::error::Result;

#[derive(Debug)]
pub struct BlogStore {
    api: ApiClient,
    pub posts: Vec<PostDto>,
    pub pagination: Option<PageMeta>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BlogStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            posts: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
        }
    }

    /// Replace the cached feed with one page from the server.
    pub async fn get_posts(&mut self, token: &str, page: u64, per_page: u64) -> Result<()> {
        self.loading = true;
        self.error = None;
        let result = self.api.list_posts(token, page, per_page).await;
        self.loading = false;

        match result {
            Ok(page) => {
                tracing::debug!(count = page.data.len(), total = page.meta.total, "Posts loaded");
                self.posts = page.data;
                self.pagination = Some(page.meta);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.message().unwrap_or("Error loading posts").to_string());
                Err(err)
            }
        }
    }

    pub async fn create_post(&mut self, token: &str, post: NewPost) -> Result<PostDto> {
        self.error = None;
        match self.api.create_post(token, post).await {
            Ok(post) => {
                self.insert_post(post.clone());
                Ok(post)
            }
            Err(err) => {
                self.error = Some(err.message().unwrap_or("Error creating post").to_string());
                Err(err)
            }
        }
    }

    pub async fn add_comment(&mut self, token: &str, post_id: i32, content: &str) -> Result<CommentDto> {
        self.error = None;
        match self.api.add_comment(token, post_id, content).await {
            Ok(comment) => {
                self.append_comment(comment.clone());
                Ok(comment)
            }
            Err(err) => {
                self.error = Some(err.message().unwrap_or("Error adding comment").to_string());
                Err(err)
            }
        }
    }

    /// Newest first, so new posts go to the front.
    fn insert_post(&mut self, post: PostDto) {
        self.posts.insert(0, post);
    }

    /// Comments are oldest first; a post outside the cached page is left alone.
    fn append_comment(&mut self, comment: CommentDto) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == comment.post_id) {
            post.comments.push(comment);
        }
    }
}
