//! Key-code checksum derivation

use sha2::Sha256;

pub const CHECKSUM_ITERATIONS: u32 = 1024;

const DERIVED_LEN: usize = 64;
const CHECKSUM_LEN: usize = 32;

/// Server-verifiable proof that the caller holds `key_code`.
///
/// PBKDF2-HMAC-SHA256 with the key code as password and the package code as
/// salt, 1024 iterations, 64 bytes derived, first 32 kept, lower-case hex.
#[must_use]
pub fn create_checksum(key_code: &str, package_code: &str) -> String {
    let mut derived = [0u8; DERIVED_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(
        key_code.as_bytes(),
        package_code.as_bytes(),
        CHECKSUM_ITERATIONS,
        &mut derived,
    );
    hex::encode(&derived[..CHECKSUM_LEN])
}
