use crate::domain::CommentContent;
use crate::error::DomainError;

/// Input for [`crate::use_cases::AddCommentUseCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentCommand {
    content: CommentContent,
    post_id: i32,
    author_id: i32,
}

impl AddCommentCommand {
    pub fn new(content: &str, post_id: i32, author_id: i32) -> Result<Self, DomainError> {
        Ok(Self {
            content: CommentContent::new(content)?,
            post_id,
            author_id,
        })
    }

    pub fn content(&self) -> &CommentContent {
        &self.content
    }

    pub fn post_id(&self) -> i32 {
        self.post_id
    }

    pub fn author_id(&self) -> i32 {
        self.author_id
    }

    pub(crate) fn into_content(self) -> CommentContent {
        self.content
    }
}
