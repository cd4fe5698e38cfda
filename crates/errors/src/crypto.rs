//! Decryption error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CryptoError {
    #[error("decryption failed: {reason}")]
    DecryptionFailed { reason: String },
}

impl CryptoError {
    pub fn decryption_failed(reason: impl Into<String>) -> Self {
        Self::DecryptionFailed {
            reason: reason.into(),
        }
    }
}

impl UserFacingError for CryptoError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("Make sure the share link is complete, including the #keyCode fragment.")
    }

    fn user_code(&self) -> Option<&'static str> {
        Some("crypto.decryption_failed")
    }
}
