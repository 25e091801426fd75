//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;
mod value_objects;

pub use comment::Comment;
pub use post::Post;
pub use user::{Author, User};
pub use value_objects::{CommentContent, PostContent, PostTitle};
