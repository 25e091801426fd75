//! In-memory repositories for use case tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};

use crate::domain::{Author, Comment, Post, PostContent, PostTitle, User};
use crate::error::RepoError;
use crate::pagination::Page;
use crate::ports::{BaseRepository, CommentRepository, Hydration, PostRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<BTreeMap<i32, User>>,
}

impl InMemoryUsers {
    pub fn with_user(id: i32, name: &str) -> Self {
        let mut user = User::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
            "hash".to_string(),
        );
        user.id = id;
        let users = Self::default();
        users.users.lock().unwrap().insert(id, user);
        users
    }

    pub fn author(&self, id: i32) -> Author {
        self.users.lock().unwrap()[&id].author()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if user.id == 0 {
            user.id = users.keys().next_back().copied().unwrap_or(0) + 1;
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPosts {
    posts: Mutex<BTreeMap<i32, Post>>,
}

impl InMemoryPosts {
    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    /// Insert a post whose creation time is later than every existing one.
    pub async fn seed(&self, author: Author) -> i32 {
        let n = self.len() as i64;
        let created = Utc::now() - TimeDelta::hours(1) + TimeDelta::seconds(n);
        let post = Post::new(
            PostTitle::new(format!("Post {n}")).unwrap(),
            PostContent::new("Body").unwrap(),
            None,
            author,
            created,
        );
        self.save(post).await.unwrap().id()
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_by_id(&self, id: i32, _hydration: Hydration) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn find_all_paginated(&self, per_page: u64, page: u64) -> Result<Page<Post>, RepoError> {
        let mut all: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });
        let total = all.len() as u64;
        let skip = ((page.max(1) - 1) * per_page) as usize;
        let items = all.into_iter().skip(skip).take(per_page as usize).collect();
        Ok(Page::new(items, total, per_page, page))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let id = posts.keys().next_back().copied().unwrap_or(0) + 1;
        let saved = Post::restore(
            id,
            post.title().clone(),
            post.content().clone(),
            post.image_path().map(str::to_owned),
            post.author().clone(),
            post.created_at(),
            post.updated_at(),
            Some(Vec::new()),
        );
        posts.insert(id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        if !posts.contains_key(&post.id()) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id(), post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.posts.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryComments {
    comments: Mutex<Vec<Comment>>,
}

impl InMemoryComments {
    pub fn len(&self) -> usize {
        self.comments.lock().unwrap().len()
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id() == post_id)
            .cloned()
            .collect())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.lock().unwrap();
        let saved = Comment::restore(
            comments.len() as i32 + 1,
            comment.content().clone(),
            comment.author().clone(),
            comment.post_id(),
            comment.created_at(),
            comment.updated_at(),
        );
        comments.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.lock().unwrap();
        let slot = comments
            .iter_mut()
            .find(|c| c.id() == comment.id())
            .ok_or(RepoError::NotFound)?;
        *slot = comment.clone();
        Ok(comment)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.id() != id);
        Ok(comments.len() != before)
    }
}
