//! API credentials

use std::fmt;

/// Host and API key pair used to sign every request.
///
/// Immutable once built; the secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    host: String,
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create credentials. A trailing `/` on the host is dropped so that
    /// `host + "/api/v2.0/..."` never doubles the separator.
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        let mut host = host.into();
        while host.ends_with('/') {
            host.pop();
        }
        Self {
            host,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let creds = Credentials::new("https://files.example.com/", "key", "secret");
        assert_eq!(creds.host(), "https://files.example.com");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("https://h", "key", "very-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("key"));
        assert!(!debug.contains("very-secret"));
    }
}
