#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations for safely
//!
//! This crate sits between the CLI and the transport, signing and
//! decryption crates: it resolves share links, drives the per-file
//! part pipeline and reports progress through events.

mod assembler;
mod context;
mod download;
mod package;
mod types;

pub use assembler::{FileAssembler, PartProgress};
pub use context::{OpsContextBuilder, OpsCtx};
pub use download::{download_package, output_path};
pub use package::{package_info, resolve_package, whoami};
pub use types::{DownloadReport, DownloadedFile, FileOutcome, FileStatus};

use safely_errors::Error;
use safely_types::{PackageSummary, UserInformation};

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    User(UserInformation),
    Package(PackageSummary),
    Download(DownloadReport),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::internal(e.to_string()))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::User(_) | OperationResult::Package(_) => true,
            OperationResult::Download(report) => report.is_success(),
        }
    }
}
