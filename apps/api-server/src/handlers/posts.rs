//! Post handlers: paginated listing and creation with an optional image.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::StreamExt;

use blog_core::DomainError;
use blog_core::commands::CreatePostCommand;
use blog_core::ports::{ImageStorage, ImageUpload};
use blog_core::use_cases::ListPostsUseCase;
use blog_shared::FieldErrors;
use blog_shared::dto::{ListPostsQuery, PaginatedPostsDto, PostDto};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Largest accepted image, in bytes (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Cap for the text parts of the form; generous next to the content limit.
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Map an accepted image content type to the extension it is stored under.
fn image_extension(essence: &str) -> Option<&'static str> {
    match essence {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/bmp" => Some("bmp"),
        "image/svg+xml" => Some("svg"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Resolve `page`/`per_page` against the defaults and the configured cap.
fn page_params(query: &ListPostsQuery, max_per_page: u64) -> (u64, u64) {
    let per_page = query
        .per_page
        .unwrap_or(ListPostsUseCase::DEFAULT_PER_PAGE)
        .clamp(1, max_per_page.max(1));
    let page = query.page.unwrap_or(1).max(1);
    (per_page, page)
}

/// GET /api/posts?page&per_page
pub async fn index(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let (per_page, page) = page_params(&query, state.max_per_page);
    tracing::debug!(user_id = identity.user_id, page, per_page, "Listing posts");

    let posts = state.list_posts.execute(per_page, page).await?;
    let dto = PaginatedPostsDto::from_page(&posts)?;

    tracing::debug!(count = dto.data.len(), total = dto.meta.total, "Posts listed");
    Ok(HttpResponse::Ok().json(dto))
}

/// Parsed `multipart/form-data` body of a new post.
#[derive(Debug, Default)]
struct PostForm {
    title: String,
    content: String,
    image: Option<ImageUpload>,
    errors: FieldErrors,
}

impl PostForm {
    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }
}

async fn read_limited(field: &mut Field, limit: usize) -> AppResult<Option<Vec<u8>>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes))
}

async fn read_text(field: &mut Field, name: &str) -> AppResult<String> {
    let bytes = read_limited(field, MAX_TEXT_FIELD_BYTES)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("The {name} field is too large.")))?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest(format!("The {name} field must be valid UTF-8.")))
}

async fn read_form(mut payload: Multipart) -> AppResult<PostForm> {
    let mut form = PostForm::default();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::BadRequest(e.to_string()))?;
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => form.title = read_text(&mut field, "title").await?,
            "content" => form.content = read_text(&mut field, "content").await?,
            "image" => {
                let extension = field
                    .content_type()
                    .and_then(|mime| image_extension(mime.essence_str()));
                let Some(bytes) = read_limited(&mut field, MAX_IMAGE_BYTES).await? else {
                    form.reject("image", "The image field must not be greater than 2048 kilobytes.");
                    continue;
                };
                // Browsers send an empty part when no file was chosen.
                if bytes.is_empty() {
                    continue;
                }
                match extension {
                    Some(extension) => form.image = Some(ImageUpload { bytes, extension }),
                    None => form.reject("image", "The image field must be an image."),
                }
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
                }
            }
        }
    }

    Ok(form)
}

/// POST /api/posts (multipart: title, content, image?)
pub async fn store(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = read_form(payload).await?;

    // Text fields validate before anything touches the disk.
    let command = CreatePostCommand::new(&form.title, &form.content, None, identity.user_id);
    if let Err(DomainError::Validation(err)) = &command {
        form.reject(err.field, err.message());
    }
    if !form.errors.is_empty() {
        return Err(AppError::Validation(form.errors));
    }
    let command = command?;

    let (command, stored) = match form.image.take() {
        Some(upload) => {
            let path = state.images.store(upload).await?;
            (command.with_image_path(path.clone()), Some(path))
        }
        None => (command, None),
    };

    let post = match state.create_post.execute(command).await {
        Ok(post) => post,
        Err(err) => {
            if let Some(path) = stored {
                if let Err(cleanup) = state.images.delete(&path).await {
                    tracing::warn!(path = %path, error = %cleanup, "Failed to remove orphaned image");
                }
            }
            return Err(err.into());
        }
    };

    tracing::info!(post_id = post.id(), user_id = identity.user_id, "Post published");
    Ok(HttpResponse::Created().json(PostDto::from_entity(&post)?))
}
