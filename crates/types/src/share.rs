//! Share-link parsing
//!
//! A share link looks like
//! `https://host/receive/?thread=T&packageCode=C#keyCode=K`. The key code
//! lives in the fragment so browsers never send it to the server.

use safely_errors::{Error, PackageError};
use std::fmt;
use url::Url;

const KEY_CODE_PARAM: &str = "keyCode";

/// The three identifiers carried by a share link.
///
/// All fields are non-empty for any value returned by
/// [`PackageMetadata::from_share_url`]; `Default` is the zero value.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PackageMetadata {
    pub thread: String,
    pub package_code: String,
    /// Secret fragment, never sent to the server.
    pub key_code: String,
}

impl PackageMetadata {
    pub fn new(
        thread: impl Into<String>,
        package_code: impl Into<String>,
        key_code: impl Into<String>,
    ) -> Self {
        Self {
            thread: thread.into(),
            package_code: package_code.into(),
            key_code: key_code.into(),
        }
    }

    /// Extract thread, package code and key code from a share link.
    ///
    /// The key code is only accepted when the link has exactly one `#` and
    /// the fragment is exactly `keyCode=<value>`. `thread` and `packageCode`
    /// come from the query string.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::MalformedShareUrl` unless all three values are
    /// present and non-empty. Partial results are never returned.
    pub fn from_share_url(share_url: &str) -> Result<Self, Error> {
        let parsed = Url::parse(share_url).map_err(|e| PackageError::MalformedShareUrl {
            reason: e.to_string(),
        })?;

        // First occurrence wins, even when it is empty
        let query_value = |key: &str| {
            parsed
                .query_pairs()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default()
        };
        let thread = query_value("thread");
        let package_code = query_value("packageCode");

        let key_code = key_code_from_fragment(share_url).unwrap_or_default();

        let missing: Vec<&str> = [
            ("thread", &thread),
            ("packageCode", &package_code),
            (KEY_CODE_PARAM, &key_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(PackageError::MalformedShareUrl {
                reason: format!("missing {}", missing.join(", ")),
            }
            .into());
        }

        Ok(Self {
            thread,
            package_code,
            key_code,
        })
    }
}

fn key_code_from_fragment(share_url: &str) -> Option<String> {
    let segments: Vec<&str> = share_url.split('#').collect();
    let [_, fragment] = segments.as_slice() else {
        return None;
    };

    let tokens: Vec<&str> = fragment.split('=').collect();
    match tokens.as_slice() {
        [KEY_CODE_PARAM, value] => Some((*value).to_string()),
        _ => None,
    }
}

impl fmt::Debug for PackageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_code = if self.key_code.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("PackageMetadata")
            .field("thread", &self.thread)
            .field("package_code", &self.package_code)
            .field("key_code", &key_code)
            .finish()
    }
}
