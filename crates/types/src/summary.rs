//! Display-ready view of a package

use serde::{Deserialize, Serialize};

use crate::Package;

/// What a user needs to pick files: who sent the package and what is in it.
///
/// Carries no secrets, so it can travel in events and CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    pub package_code: String,
    pub package_sender: String,
    pub package_timestamp: String,
    pub files: Vec<FileSummary>,
}

/// One row of the file listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Index accepted by `download --file` (0-based)
    pub index: usize,
    pub file_name: String,
    pub uploaded: String,
    /// Human-readable size
    pub size: String,
    pub parts: u32,
}

impl Package {
    #[must_use]
    pub fn summary(&self) -> PackageSummary {
        PackageSummary {
            package_code: self.package_code.clone(),
            package_sender: self.package_sender.clone(),
            package_timestamp: self.package_timestamp.clone(),
            files: self
                .files
                .iter()
                .enumerate()
                .map(|(index, file)| FileSummary {
                    index,
                    file_name: file.file_name.clone(),
                    uploaded: file.file_uploaded_str.clone(),
                    size: file.human_size(),
                    parts: file.parts,
                })
                .collect(),
        }
    }
}

impl PackageSummary {
    /// Total number of parts across all files
    #[must_use]
    pub fn total_parts(&self) -> u64 {
        self.files.iter().map(|f| u64::from(f.parts)).sum()
    }
}
