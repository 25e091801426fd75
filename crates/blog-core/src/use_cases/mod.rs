//! Use cases - one application operation each.
//!
//! Every use case follows the same order: the command was validated on
//! construction, referenced entities are resolved next, and persistence runs
//! last. Nothing is retried; errors propagate to the caller unchanged.

mod add_comment;
mod create_post;
mod list_posts;

pub use add_comment::AddCommentUseCase;
pub use create_post::CreatePostUseCase;
pub use list_posts::ListPostsUseCase;

#[cfg(test)]
pub(crate) mod fakes;
