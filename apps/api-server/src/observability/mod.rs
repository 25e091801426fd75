//! Observability module - request ids and request-scoped tracing.

mod request_id;

pub use request_id::{RequestIdMiddleware, current_request_id};
