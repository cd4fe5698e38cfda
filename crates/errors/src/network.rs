//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkError {
    /// Connection, DNS, TLS or timeout failure before a usable response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with anything other than 200.
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Transport(_) => Some("Check the API host and your network connection."),
            Self::UnexpectedStatus { status: 401 | 403 } => {
                Some("Verify the API key and secret in your configuration.")
            }
            Self::UnexpectedStatus { status: 404 } => {
                Some("The package may have expired or the link is wrong.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::UnexpectedStatus { status } => *status >= 500,
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Transport(_) => "network.transport",
            Self::UnexpectedStatus { .. } => "network.unexpected_status",
            Self::MalformedResponse(_) => "network.malformed_response",
            Self::ClientBuild(_) => "network.client_build",
        };
        Some(code)
    }
}
