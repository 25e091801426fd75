//! Self-validating text values.
//!
//! Each type trims its input and rejects it when the trimmed text is empty or
//! longer than the type's limit. Length is counted in characters on the trimmed
//! text, which is exactly what gets stored.

use std::fmt;

use crate::error::ValidationError;

macro_rules! text_value_object {
    ($(#[$meta:meta])* $name:ident, field = $field:literal, max = $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub const MAX_LENGTH: usize = $max;
            pub const FIELD: &'static str = $field;

            pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty(Self::FIELD));
                }
                if trimmed.chars().count() > Self::MAX_LENGTH {
                    return Err(ValidationError::too_long(Self::FIELD, Self::MAX_LENGTH));
                }
                Ok(Self(trimmed.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }
    };
}

text_value_object!(
    /// Title of a post, at most 255 characters.
    PostTitle,
    field = "title",
    max = 255
);

text_value_object!(
    /// Body of a post, at most 10 000 characters.
    PostContent,
    field = "content",
    max = 10_000
);

text_value_object!(
    /// Body of a comment, at most 1 000 characters.
    CommentContent,
    field = "content",
    max = 1_000
);
