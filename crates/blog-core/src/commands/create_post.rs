use crate::domain::{PostContent, PostTitle};
use crate::error::DomainError;

/// Input for [`crate::use_cases::CreatePostUseCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostCommand {
    title: PostTitle,
    content: PostContent,
    image_path: Option<String>,
    author_id: i32,
}

impl CreatePostCommand {
    pub fn new(
        title: &str,
        content: &str,
        image_path: Option<String>,
        author_id: i32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title: PostTitle::new(title)?,
            content: PostContent::new(content)?,
            image_path,
            author_id,
        })
    }

    /// Attach the path of an image stored after the text fields validated.
    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    pub fn content(&self) -> &PostContent {
        &self.content
    }

    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    pub fn author_id(&self) -> i32 {
        self.author_id
    }

    pub(crate) fn into_parts(self) -> (PostTitle, PostContent, Option<String>) {
        (self.title, self.content, self.image_path)
    }
}
