use safely_types::PackageSummary;
use serde::{Deserialize, Serialize};

/// Package lookup events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PackageEvent {
    /// Share link resolved and package descriptor fetched
    Resolved {
        summary: PackageSummary,
        total_parts: u64,
    },
}
