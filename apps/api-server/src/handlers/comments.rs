//! Comment handlers.

use actix_web::{HttpResponse, web};

use blog_core::commands::AddCommentCommand;
use blog_shared::dto::{AddCommentRequest, CommentDto};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{post_id}/comments
pub async fn store(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let command = AddCommentCommand::new(&body.content, post_id, identity.user_id)?;

    let comment = state.add_comment.execute(command).await?;
    tracing::info!(
        comment_id = comment.id(),
        post_id,
        user_id = identity.user_id,
        "Comment added"
    );

    Ok(HttpResponse::Created().json(CommentDto::from_entity(&comment)))
}
