//! Passphrase supply with single-attempt semantics

use safely_errors::CryptoError;
use std::fmt;

/// Symmetric passphrase for a package: `server_secret || key_code`.
#[derive(Clone, PartialEq, Eq)]
pub struct Passphrase(String);

impl Passphrase {
    /// Join the server-held secret and the share link's key code, in that
    /// order, with no separator.
    #[must_use]
    pub fn from_parts(server_secret: &str, key_code: &str) -> Self {
        let mut value = String::with_capacity(server_secret.len() + key_code.len());
        value.push_str(server_secret);
        value.push_str(key_code);
        Self(value)
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Passphrase {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

/// Whether the passphrase has been handed out yet.
///
/// The passphrase can be taken exactly once. Asking again yields
/// `DecryptionFailed` instead of a second prompt, so a wrongly derived key
/// fails immediately rather than looping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassphraseState {
    NotAttempted(Passphrase),
    Exhausted,
}

impl PassphraseState {
    #[must_use]
    pub fn new(passphrase: Passphrase) -> Self {
        Self::NotAttempted(passphrase)
    }

    /// Hand out the passphrase and move to `Exhausted`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::DecryptionFailed` if the passphrase was already
    /// taken.
    pub fn take(&mut self) -> Result<Passphrase, CryptoError> {
        match std::mem::replace(self, Self::Exhausted) {
            Self::NotAttempted(passphrase) => Ok(passphrase),
            Self::Exhausted => Err(CryptoError::decryption_failed(
                "passphrase already used for this part",
            )),
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}
