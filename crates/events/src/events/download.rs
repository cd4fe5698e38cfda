use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::FailureContext;

/// Download-specific events, one stream per file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    Started {
        file_id: String,
        file_name: String,
        parts: u32,
        total_size: Option<u64>,
    },

    /// One part fetched, decrypted and written
    PartCompleted {
        file_id: String,
        part: u32,
        parts: u32,
        /// Cumulative plaintext bytes written for this file
        bytes_written: u64,
    },

    Completed {
        file_id: String,
        path: PathBuf,
        bytes_written: u64,
        duration: Duration,
    },

    /// Remaining parts were abandoned; bytes already written stay on disk
    Failed {
        file_id: String,
        file_name: String,
        failure: FailureContext,
    },
}
