//! Commands - validated input bundles built from raw request fields.
//!
//! Construction runs every value-object check, so a command that exists is
//! already valid. Commands carry data only and perform no I/O.

mod add_comment;
mod create_post;

pub use add_comment::AddCommentCommand;
pub use create_post::CreatePostCommand;
