//! Output file policy

use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do when a download target already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingOutput {
    /// Refuse to touch an existing file.
    #[default]
    Fail,
    /// Discard existing content before writing.
    Truncate,
    /// Write after any existing content.
    Append,
}

impl fmt::Display for ExistingOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fail => "fail",
            Self::Truncate => "truncate",
            Self::Append => "append",
        })
    }
}
