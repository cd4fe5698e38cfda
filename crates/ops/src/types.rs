//! Types for operations and results

use safely_events::FailureContext;
use serde::Serialize;
use std::path::PathBuf;

/// A file that was fully fetched, decrypted and written
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DownloadedFile {
    pub path: PathBuf,
    /// Plaintext bytes written by this download
    pub bytes_written: u64,
    pub parts: u32,
}

/// Outcome of one selected file
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Downloaded(DownloadedFile),
    Failed(FailureContext),
}

#[derive(Clone, Debug, Serialize)]
pub struct FileOutcome {
    /// Index of the file within the package (0-based)
    pub index: usize,
    pub file_id: String,
    pub file_name: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Result of downloading the selected files of one package
#[derive(Clone, Debug, Serialize)]
pub struct DownloadReport {
    pub package_code: String,
    pub package_sender: String,
    pub files: Vec<FileOutcome>,
    pub duration_ms: u64,
}

impl DownloadReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Failed(_)))
    }

    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.files
            .iter()
            .map(|f| match &f.status {
                FileStatus::Downloaded(done) => done.bytes_written,
                FileStatus::Failed(_) => 0,
            })
            .sum()
    }
}
