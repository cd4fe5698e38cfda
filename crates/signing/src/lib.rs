#![deny(clippy::pedantic, unsafe_code)]

//! Request authentication for the file-transfer API
//!
//! Two pieces of key material are derived here: the per-request HMAC
//! signature that authenticates the API key holder, and the PBKDF2 checksum
//! that proves possession of a share link's key code without revealing it.

mod checksum;
mod request;

pub use checksum::{create_checksum, CHECKSUM_ITERATIONS};
pub use request::{
    create_signature, format_timestamp, RequestSigner, SignedHeaders, API_KEY_HEADER,
    SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
