//! Package-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackageError {
    #[error("could not find packageCode, thread or keyCode in URL: {reason}")]
    MalformedShareUrl { reason: String },

    #[error("file index {index} out of range (package has {count} files)")]
    FileIndexOutOfRange { index: usize, count: usize },

    #[error("invalid file name from server: {name:?}")]
    InvalidFileName { name: String },

    #[error("output already exists: {path}")]
    OutputExists { path: String },
}

impl UserFacingError for PackageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MalformedShareUrl { .. } => Some(
                "Use the full link: https://host/receive/?thread=..&packageCode=..#keyCode=..",
            ),
            Self::FileIndexOutOfRange { .. } => Some("File indices start at 0."),
            Self::OutputExists { .. } => {
                Some("Remove the existing file, or pass --overwrite or --append.")
            }
            Self::InvalidFileName { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::MalformedShareUrl { .. } => "package.malformed_share_url",
            Self::FileIndexOutOfRange { .. } => "package.file_index_out_of_range",
            Self::InvalidFileName { .. } => "package.invalid_file_name",
            Self::OutputExists { .. } => "package.output_exists",
        };
        Some(code)
    }
}
