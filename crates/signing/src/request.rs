//! HMAC-SHA256 request signatures

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use safely_types::Credentials;
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

pub const API_KEY_HEADER: &str = "ss-api-key";
pub const TIMESTAMP_HEADER: &str = "ss-request-timestamp";
pub const SIGNATURE_HEADER: &str = "ss-request-signature";

/// Format an instant the way the server expects it in both the signed
/// content and the timestamp header: RFC 3339, second precision, UTC, with
/// `+0000` in place of `Z`.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S+0000").to_string()
}

/// Uppercase hex HMAC-SHA256 over `api_key || url_path || timestamp || body`.
///
/// The fields are concatenated with no delimiters; the server recomputes the
/// same bytes.
///
/// # Panics
///
/// Does not panic: HMAC accepts keys of any length, so building the MAC
/// cannot fail.
#[must_use]
pub fn create_signature(
    api_key: &str,
    api_secret: &str,
    url_path: &str,
    timestamp: &str,
    body: &[u8],
) -> String {
    let mut mac = HmacSha256::new_from_slice(api_secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(api_key.as_bytes());
    mac.update(url_path.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.update(body);
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Header values for one signed request.
///
/// `timestamp` is the exact string that went into `signature`.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub api_key: String,
    pub timestamp: String,
    pub signature: String,
}

impl SignedHeaders {
    /// `(name, value)` pairs in the order they are attached to a request
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (API_KEY_HEADER, self.api_key.as_str()),
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}

impl fmt::Debug for SignedHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedHeaders")
            .field("api_key", &self.api_key)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

/// Signs requests on behalf of one API key.
#[derive(Clone)]
pub struct RequestSigner {
    api_key: String,
    api_secret: String,
}

impl RequestSigner {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(credentials.api_key(), credentials.api_secret())
    }

    /// Sign `path` and `body` at `instant`.
    ///
    /// `path` is the full API path including the `/api/v2.0` prefix, without
    /// scheme or host.
    #[must_use]
    pub fn sign_at(&self, path: &str, body: &[u8], instant: DateTime<Utc>) -> SignedHeaders {
        let timestamp = format_timestamp(instant);
        let signature = create_signature(&self.api_key, &self.api_secret, path, &timestamp, body);
        SignedHeaders {
            api_key: self.api_key.clone(),
            timestamp,
            signature,
        }
    }

    /// Sign with the current time. Call immediately before sending.
    #[must_use]
    pub fn sign(&self, path: &str, body: &[u8]) -> SignedHeaders {
        self.sign_at(path, body, Utc::now())
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}
