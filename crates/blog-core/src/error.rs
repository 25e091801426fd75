//! Domain-level error types.

use thiserror::Error;

/// Why a value object rejected its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Empty or whitespace only.
    Empty,
    /// Longer than `max` characters.
    TooLong { max: usize },
}

impl ValidationReason {
    /// Stable machine-readable code (`empty`, `too_long`).
    pub fn code(&self) -> &'static str {
        match self {
            ValidationReason::Empty => "empty",
            ValidationReason::TooLong { .. } => "too_long",
        }
    }
}

/// A single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {}", .reason.code())]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn empty(field: &'static str) -> Self {
        Self {
            field,
            reason: ValidationReason::Empty,
        }
    }

    pub fn too_long(field: &'static str, max: usize) -> Self {
        Self {
            field,
            reason: ValidationReason::TooLong { max },
        }
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self.reason {
            ValidationReason::Empty => format!("The {} field is required.", self.field),
            ValidationReason::TooLong { max } => format!(
                "The {} field must not be greater than {} characters.",
                self.field, max
            ),
        }
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Entity not found: {resource} with id {id}")]
    NotFound { resource: &'static str, id: i32 },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Relation not loaded: {0}")]
    MissingRelation(&'static str),

    #[error("Comment belongs to post {found}, not post {expected}")]
    ForeignComment { expected: i32, found: i32 },

    #[error(transparent)]
    Persistence(#[from] RepoError),
}

impl DomainError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        DomainError::NotFound { resource, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Related row missing: {0}")]
    MissingRelation(&'static str),

    #[error("Stored row is invalid: {0}")]
    InvalidRow(String),
}

impl From<ValidationError> for RepoError {
    fn from(err: ValidationError) -> Self {
        RepoError::InvalidRow(err.to_string())
    }
}
