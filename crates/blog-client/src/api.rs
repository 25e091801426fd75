//! Thin reqwest wrapper over the blog's JSON endpoints.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use blog_shared::ErrorResponse;
use blog_shared::dto::{
    AddCommentRequest, AuthResponse, CommentDto, LoginRequest, MeResponse, MessageResponse,
    PaginatedPostsDto, PostDto, RegisterUserRequest, UserDto,
};

use crate::error::{ClientError, Result};

/// An image chosen for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    /// Content type, e.g. `image/png`.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Fields of the post creation form.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image: Option<ImageFile>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` points at the API root, e.g. `http://localhost:8080/api`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        handle_response(response).await
    }

    pub async fn register(&self, request: &RegisterUserRequest) -> Result<AuthResponse> {
        self.send(self.client.post(self.url("/auth/register")).json(request))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.send(self.client.post(self.url("/auth/login")).json(request))
            .await
    }

    pub async fn me(&self, token: &str) -> Result<UserDto> {
        let me: MeResponse = self
            .send(self.client.get(self.url("/auth/me")).bearer_auth(token))
            .await?;
        Ok(me.user)
    }

    pub async fn logout(&self, token: &str) -> Result<MessageResponse> {
        self.send(self.client.post(self.url("/auth/logout")).bearer_auth(token))
            .await
    }

    pub async fn list_posts(&self, token: &str, page: u64, per_page: u64) -> Result<PaginatedPostsDto> {
        let request = self
            .client
            .get(self.url("/posts"))
            .bearer_auth(token)
            .query(&[("page", page), ("per_page", per_page)]);
        self.send(request).await
    }

    pub async fn create_post(&self, token: &str, post: NewPost) -> Result<PostDto> {
        let mut form = Form::new()
            .text("title", post.title)
            .text("content", post.content);
        if let Some(image) = post.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)?;
            form = form.part("image", part);
        }

        self.send(
            self.client
                .post(self.url("/posts"))
                .bearer_auth(token)
                .multipart(form),
        )
        .await
    }

    pub async fn add_comment(&self, token: &str, post_id: i32, content: &str) -> Result<CommentDto> {
        let body = AddCommentRequest {
            content: content.to_string(),
        };
        self.send(
            self.client
                .post(self.url(&format!("/posts/{post_id}/comments")))
                .bearer_auth(token)
                .json(&body),
        )
        .await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            problem: serde_json::from_str::<ErrorResponse>(&body).ok(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}
