//! # Blog Shared
//!
//! Wire types shared between the API server and its clients.
//! The entity projection lives behind the `server` feature so clients do not
//! pull in the domain crate.

pub mod dto;
pub mod response;

#[cfg(feature = "server")]
pub mod mapping;

pub use response::{ErrorResponse, FieldErrors};
