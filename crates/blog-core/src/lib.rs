//! # Blog Core
//!
//! The domain layer of the blog API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! value objects, entities, commands, use cases and the ports that
//! infrastructure must implement.

pub mod commands;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod use_cases;

pub use error::{DomainError, RepoError, ValidationError, ValidationReason};
pub use pagination::Page;
