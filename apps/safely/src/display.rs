//! Output rendering and formatting

use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use console::style;
use safely_ops::{DownloadReport, FileStatus, OperationResult};
use safely_types::{PackageSummary, UserInformation};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    json_output: bool,
}

impl OutputRenderer {
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Render operation result to stdout
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            let json = result.to_json().map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        match result {
            OperationResult::User(user) => println!("{}", render_user(user)),
            OperationResult::Package(summary) => println!("{}", render_package(summary)),
            OperationResult::Download(report) => println!("{}", render_download(report)),
        }
        Ok(())
    }
}

fn render_user(user: &UserInformation) -> String {
    let name = user.display_name();
    if name.is_empty() {
        format!("Logged in as {}", user.email)
    } else {
        format!("Logged in as {name} ({})", user.email)
    }
}

/// Package header followed by the numbered file list
pub fn render_package(summary: &PackageSummary) -> String {
    let mut header = Table::new();
    header.load_preset(NOTHING);
    header.add_row(vec![Cell::new("Package"), Cell::new(&summary.package_code)]);
    header.add_row(vec![Cell::new("Sent by"), Cell::new(&summary.package_sender)]);
    header.add_row(vec![Cell::new("Sent on"), Cell::new(&summary.package_timestamp)]);

    let mut files = Table::new();
    files
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    files.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Uploaded").add_attribute(Attribute::Bold),
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("File Name").add_attribute(Attribute::Bold),
    ]);
    for file in &summary.files {
        files.add_row(vec![
            Cell::new(file.index),
            Cell::new(&file.uploaded),
            Cell::new(&file.size),
            Cell::new(&file.file_name),
        ]);
    }

    format!("{header}\n\n{files}")
}

fn render_download(report: &DownloadReport) -> String {
    let mut lines = Vec::with_capacity(report.files.len() + 1);
    if !report.package_sender.is_empty() {
        lines.push(format!("Package from {}", report.package_sender));
    }

    for file in &report.files {
        match &file.status {
            FileStatus::Downloaded(done) => lines.push(format!(
                "{} [{}] {} -> {} ({} bytes)",
                style("ok").green(),
                file.index,
                file.file_name,
                done.path.display(),
                done.bytes_written
            )),
            FileStatus::Failed(failure) => lines.push(format!(
                "{} [{}] {}: {}",
                style("failed").red(),
                file.index,
                file.file_name,
                failure.message
            )),
        }
    }

    let failed = report.failed().count();
    lines.push(format!(
        "{} of {} file(s) downloaded in {} ms",
        report.files.len() - failed,
        report.files.len(),
        report.duration_ms
    ));
    lines.join("\n")
}
