//! Tracing setup and structured logging of events

use safely_events::{AppEvent, DownloadEvent, EventMessage, GeneralEvent, PackageEvent};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const DEBUG_FILTER: &str = "info,safely=debug,safely_ops=debug,safely_net=debug";

/// Directory that receives `--debug` log files
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("safely")
        .join("logs")
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the global subscriber.
///
/// With `--debug`, JSON logs go to a timestamped file in the log directory.
/// With `--json` alone, nothing is logged so stdout stays machine-readable.
/// Otherwise human-readable logs go to stderr, filtered by `RUST_LOG`.
pub fn init_tracing(json_mode: bool, debug_enabled: bool) {
    if debug_enabled {
        let dir = log_dir();
        let log_file = dir.join(format!(
            "safely-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        let file = std::fs::create_dir_all(&dir).and_then(|()| std::fs::File::create(&log_file));
        match file {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(env_filter(DEBUG_FILTER))
                    .init();
                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(DEFAULT_FILTER))
            .init();
    }
}

/// Log an event through tracing with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    let source = meta.source.as_str();
    let correlation = meta.correlation_id.as_deref().unwrap_or_default();

    match &message.event {
        AppEvent::Download(DownloadEvent::Started {
            file_id,
            parts,
            total_size,
            ..
        }) => info!(source, correlation, %file_id, parts, total_size = ?total_size, "Download started"),
        AppEvent::Download(DownloadEvent::PartCompleted {
            file_id,
            part,
            parts,
            bytes_written,
        }) => debug!(source, correlation, %file_id, part, parts, bytes_written, "Part completed"),
        AppEvent::Download(DownloadEvent::Completed {
            file_id,
            path,
            bytes_written,
            duration,
        }) => info!(
            source,
            correlation,
            %file_id,
            path = %path.display(),
            bytes_written,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "Download completed"
        ),
        AppEvent::Download(DownloadEvent::Failed {
            file_id, failure, ..
        }) => error!(
            source,
            correlation,
            %file_id,
            code = ?failure.code,
            retryable = failure.retryable,
            "Download failed: {}",
            failure.message
        ),
        AppEvent::Package(PackageEvent::Resolved {
            summary,
            total_parts,
        }) => info!(
            source,
            package_code = %summary.package_code,
            file_count = summary.files.len(),
            total_parts,
            "Package resolved"
        ),
        AppEvent::General(GeneralEvent::Warning { message, context }) => {
            warn!(source, context = ?context, "{message}");
        }
        AppEvent::General(GeneralEvent::DebugLog { message, context }) => {
            debug!(source, context = ?context, "{message}");
        }
        AppEvent::General(GeneralEvent::OperationStarted { operation }) => {
            debug!(source, %operation, "Operation started");
        }
        AppEvent::General(GeneralEvent::OperationCompleted { operation, success }) => {
            info!(source, %operation, success, "Operation completed");
        }
        AppEvent::General(GeneralEvent::OperationFailed { operation, error }) => {
            error!(source, %operation, "Operation failed: {error}");
        }
    }
}
