//! Package download driver

use safely_errors::{Error, PackageError};
use safely_events::{AppEvent, DownloadEvent, EventEmitter, FailureContext};
use safely_types::{FileDescriptor, Package};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::{
    resolve_package, DownloadReport, FileAssembler, FileOutcome, FileStatus, OpsCtx, PartProgress,
};

/// Download the selected files of the package behind `share_url` into
/// `output_dir`.
///
/// `selection` holds 0-based file indices; an empty selection means every
/// file. Files are processed one at a time. A file that fails is recorded
/// in the report and the next file is attempted.
///
/// # Errors
///
/// Returns an error if the link is malformed, the package lookup fails, a
/// selected index is out of range, or the output directory cannot be
/// created. Per-file failures are reported, not returned.
pub async fn download_package(
    ctx: &OpsCtx,
    share_url: &str,
    selection: &[usize],
    output_dir: &Path,
) -> Result<DownloadReport, Error> {
    ctx.emit_operation_started("download");

    match download_selected(ctx, share_url, selection, output_dir).await {
        Ok(report) => {
            ctx.emit_operation_completed("download", report.is_success());
            Ok(report)
        }
        Err(e) => {
            ctx.emit_operation_failed("download", e.to_string());
            Err(e)
        }
    }
}

async fn download_selected(
    ctx: &OpsCtx,
    share_url: &str,
    selection: &[usize],
    output_dir: &Path,
) -> Result<DownloadReport, Error> {
    let start = Instant::now();

    let (metadata, package) = resolve_package(ctx, share_url).await?;
    let indices = select_files(&package, selection)?;
    if indices.len() < selection.len() {
        ctx.emit_warning(format!(
            "{} duplicate file index(es) ignored",
            selection.len() - indices.len()
        ));
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| Error::io_with_path(&e, output_dir))?;

    let assembler = FileAssembler::new(&ctx.net).with_existing(ctx.config.download.existing);
    let mut files = Vec::with_capacity(indices.len());

    for index in indices {
        let file = &package.files[index];

        let status = match output_path(output_dir, &file.file_name) {
            Ok(target) => {
                ctx.emit_correlated(
                    &file.file_id,
                    AppEvent::Download(DownloadEvent::Started {
                        file_id: file.file_id.clone(),
                        file_name: file.file_name.clone(),
                        parts: file.parts,
                        total_size: file.size_bytes(),
                    }),
                );

                let file_start = Instant::now();
                let observer: &(dyn Fn(PartProgress) + Send + Sync) = &|progress| {
                    ctx.emit_correlated(
                        &file.file_id,
                        AppEvent::Download(DownloadEvent::PartCompleted {
                            file_id: file.file_id.clone(),
                            part: progress.part,
                            parts: progress.parts,
                            bytes_written: progress.bytes_written,
                        }),
                    );
                };

                assembler
                    .download_file(&metadata, &package, file, &target, Some(observer))
                    .await
                    .map(|done| {
                        ctx.emit_correlated(
                            &file.file_id,
                            AppEvent::Download(DownloadEvent::Completed {
                                file_id: file.file_id.clone(),
                                path: done.path.clone(),
                                bytes_written: done.bytes_written,
                                duration: file_start.elapsed(),
                            }),
                        );
                        done
                    })
            }
            Err(e) => Err(e),
        };

        let status = match status {
            Ok(done) => {
                info!(file_id = %file.file_id, bytes = done.bytes_written, "File downloaded");
                FileStatus::Downloaded(done)
            }
            Err(e) => {
                warn!(file_id = %file.file_id, error = %e, "File download failed");
                let failure = FailureContext::from_error(&e);
                ctx.emit_correlated(
                    &file.file_id,
                    AppEvent::Download(DownloadEvent::Failed {
                        file_id: file.file_id.clone(),
                        file_name: file.file_name.clone(),
                        failure: failure.clone(),
                    }),
                );
                FileStatus::Failed(failure)
            }
        };

        files.push(outcome(index, file, status));
    }

    Ok(DownloadReport {
        package_code: metadata.package_code,
        package_sender: package.package_sender,
        files,
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

fn outcome(index: usize, file: &FileDescriptor, status: FileStatus) -> FileOutcome {
    FileOutcome {
        index,
        file_id: file.file_id.clone(),
        file_name: file.file_name.clone(),
        status,
    }
}

/// Validate the selection and return the indices to download, in the order
/// given, without duplicates.
fn select_files(package: &Package, selection: &[usize]) -> Result<Vec<usize>, Error> {
    let count = package.files.len();
    if selection.is_empty() {
        return Ok((0..count).collect());
    }

    let mut indices = Vec::with_capacity(selection.len());
    for &index in selection {
        if index >= count {
            return Err(PackageError::FileIndexOutOfRange { index, count }.into());
        }
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    Ok(indices)
}

/// Join a server-supplied file name onto `output_dir`, keeping only its
/// final path component.
///
/// # Errors
///
/// Returns `PackageError::InvalidFileName` if nothing usable remains.
pub fn output_path(output_dir: &Path, file_name: &str) -> Result<PathBuf, Error> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        return Err(PackageError::InvalidFileName {
            name: file_name.to_string(),
        }
        .into());
    }
    Ok(output_dir.join(base))
}
