//! OpenPGP message decryption

use pgp::{Deserializable, Message};
use safely_errors::{CryptoError, Error};
use std::io::Read;
use tracing::debug;

use crate::passphrase::{Passphrase, PassphraseState};

/// Decrypts one symmetric-passphrase OpenPGP message.
///
/// Build a new `Decryptor` for every part; attempt state is never shared
/// across parts or files.
#[derive(Debug)]
pub struct Decryptor {
    state: PassphraseState,
}

impl Decryptor {
    #[must_use]
    pub fn new(passphrase: Passphrase) -> Self {
        Self {
            state: PassphraseState::new(passphrase),
        }
    }

    /// Decrypt a binary OpenPGP message and return its literal body.
    ///
    /// The passphrase is consulted at most once. Signatures inside the
    /// message are not verified.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::DecryptionFailed` if this decryptor was already
    /// used, the input is not an OpenPGP message, the passphrase is rejected,
    /// or the message carries no literal data.
    pub fn decrypt<R: Read>(&mut self, ciphertext: R) -> Result<Vec<u8>, Error> {
        let passphrase = self.state.take()?;

        let message = Message::from_bytes(ciphertext).map_err(|e| {
            CryptoError::decryption_failed(format!("not an OpenPGP message: {e}"))
        })?;

        let secret = passphrase.expose().to_owned();
        let decrypted = message
            .decrypt_with_password(move || secret)
            .map_err(|e| CryptoError::decryption_failed(format!("passphrase rejected: {e}")))?;

        let plaintext = decrypted
            .get_content()
            .map_err(|e| CryptoError::decryption_failed(format!("unreadable message body: {e}")))?
            .ok_or_else(|| CryptoError::decryption_failed("message has no literal data"))?;

        debug!(bytes = plaintext.len(), "Decrypted part");
        Ok(plaintext)
    }

    /// True once the passphrase has been handed out
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }
}
