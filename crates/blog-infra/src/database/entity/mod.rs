//! SeaORM table definitions.

pub mod comment;
pub mod post;
pub mod revoked_token;
pub mod user;
