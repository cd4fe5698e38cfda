//! Package descriptors returned by the service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side container of one or more files, addressed by a package code.
///
/// Only the fields the download pipeline and CLI consume are modeled; the
/// rest of the response is ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub package_id: String,
    pub package_code: String,
    /// Per-package secret; half of the symmetric decryption passphrase.
    pub server_secret: String,
    pub files: Vec<FileDescriptor>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub package_sender: String,
    #[serde(default)]
    pub package_timestamp: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub response: String,
}

impl Package {
    /// Total number of parts across all files
    #[must_use]
    pub fn total_parts(&self) -> u64 {
        self.files.iter().map(|f| u64::from(f.parts)).sum()
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("package_id", &self.package_id)
            .field("package_code", &self.package_code)
            .field("server_secret", &"<redacted>")
            .field("files", &self.files)
            .field("package_sender", &self.package_sender)
            .field("package_timestamp", &self.package_timestamp)
            .finish_non_exhaustive()
    }
}

/// A single file inside a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub file_id: String,
    pub file_name: String,
    /// Size in bytes, sent by the server as a decimal string.
    #[serde(default)]
    pub file_size: String,
    /// Number of sequential fetch/decrypt cycles needed for this file.
    pub parts: u32,
    #[serde(default)]
    pub file_uploaded: String,
    #[serde(default)]
    pub file_uploaded_str: String,
}

impl FileDescriptor {
    /// Parsed file size, if the server sent a number
    #[must_use]
    pub fn size_bytes(&self) -> Option<u64> {
        self.file_size.trim().parse().ok()
    }

    /// File size for display, e.g. `1.5 MiB`. Falls back to the raw string.
    #[must_use]
    pub fn human_size(&self) -> String {
        const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

        let Some(bytes) = self.size_bytes() else {
            return self.file_size.clone();
        };
        if bytes < 1024 {
            return format!("{bytes} B");
        }

        #[allow(clippy::cast_precision_loss)]
        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Package recipient as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub recipient_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}
