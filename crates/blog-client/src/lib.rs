//! # Blog Client
//!
//! Typed access to the blog API plus two stateful stores:
//! [`AuthStore`] for the session and [`BlogStore`] for the post feed.
//! Every authenticated request carries the bearer token passed in by the caller.

pub mod api;
pub mod auth_store;
pub mod blog_store;
pub mod error;
pub mod session;

pub use api::{ApiClient, ImageFile, NewPost};
pub use auth_store::AuthStore;
pub use blog_store::BlogStore;
pub use error::{ClientError, Result};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
