use blog_shared::ErrorResponse;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api {
        status: u16,
        problem: Option<ErrorResponse>,
        body: String,
    },

    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session storage failed: {0}")]
    Session(#[from] std::io::Error),
}

impl ClientError {
    /// The server's explanation of the failure, when it sent one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api {
                problem: Some(problem),
                ..
            } => Some(problem.detail.as_deref().unwrap_or(&problem.title)),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
