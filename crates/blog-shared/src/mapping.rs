//! Projection of domain entities onto wire DTOs.

use blog_core::domain::{Author, Comment, Post, User};
use blog_core::{DomainError, Page};
use chrono::{DateTime, Utc};

use crate::dto::{
    AuthorDto, CommentDto, PageMeta, PaginatedPostsDto, PostDto, TIMESTAMP_FORMAT, UserDto,
};

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            email: author.email.clone(),
        }
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl CommentDto {
    pub fn from_entity(comment: &Comment) -> Self {
        Self {
            id: comment.id(),
            content: comment.content().as_str().to_owned(),
            author: comment.author().into(),
            post_id: comment.post_id(),
            created_at: format_timestamp(comment.created_at()),
            updated_at: format_timestamp(comment.updated_at()),
        }
    }
}

impl PostDto {
    /// Fails with [`DomainError::MissingRelation`] if the comments were not loaded.
    pub fn from_entity(post: &Post) -> Result<Self, DomainError> {
        let comments = post.comments()?.iter().map(CommentDto::from_entity).collect();

        Ok(Self {
            id: post.id(),
            title: post.title().as_str().to_owned(),
            content: post.content().as_str().to_owned(),
            image: post.image_path().map(str::to_owned),
            author: post.author().into(),
            created_at: format_timestamp(post.created_at()),
            updated_at: format_timestamp(post.updated_at()),
            comments,
        })
    }
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            total: page.total,
            per_page: page.per_page,
            current_page: page.current_page,
            last_page: page.last_page(),
            from: page.from(),
            to: page.to(),
        }
    }
}

impl PaginatedPostsDto {
    pub fn from_page(page: &Page<Post>) -> Result<Self, DomainError> {
        let data = page
            .items
            .iter()
            .map(PostDto::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            data,
            meta: page.into(),
        })
    }
}
