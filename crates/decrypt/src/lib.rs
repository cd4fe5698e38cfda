#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Symmetric OpenPGP decryption for downloaded parts
//!
//! Every part of a file is an independent, passphrase-encrypted OpenPGP
//! message. The plaintext is taken from the literal data packet without
//! verifying any signature: request signing and the checksum exchange are the
//! trust anchor, not message integrity.

mod decryptor;
mod passphrase;

pub use decryptor::Decryptor;
pub use passphrase::{Passphrase, PassphraseState};
