//! Event handling and progress display

use console::{style, Term};
use safely_events::{AppEvent, DownloadEvent, EventMessage, PackageEvent};
use std::collections::HashMap;

use crate::display::render_package;
use crate::logging::log_event_with_tracing;

/// Turns events into progress lines on stderr
pub struct EventHandler {
    term: Term,
    /// Suppress all terminal output (JSON mode)
    quiet: bool,
    /// Print the package listing once the package is resolved
    list_files: bool,
    /// File names by file id, for part progress lines
    names: HashMap<String, String>,
}

impl EventHandler {
    pub fn new(quiet: bool, list_files: bool) -> Self {
        Self {
            term: Term::stderr(),
            quiet,
            list_files,
            names: HashMap::new(),
        }
    }

    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);
        if let Some(line) = self.render(message.event) {
            if !self.quiet {
                let _ = self.term.write_line(&line);
            }
        }
    }

    /// Line to show for an event, if any
    fn render(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::Package(PackageEvent::Resolved {
                summary,
                total_parts,
            }) => self.list_files.then(|| {
                format!(
                    "{}\n\n{} file(s) in {total_parts} part(s)\n",
                    render_package(&summary),
                    summary.files.len()
                )
            }),
            AppEvent::Download(DownloadEvent::Started {
                file_id,
                file_name,
                parts,
                ..
            }) => {
                let line = format!("{} {file_name} ({parts} parts)", style("Downloading").cyan());
                self.names.insert(file_id, file_name);
                Some(line)
            }
            AppEvent::Download(DownloadEvent::PartCompleted {
                file_id,
                part,
                parts,
                bytes_written,
            }) => {
                let name = self.names.get(&file_id).map_or(file_id.as_str(), String::as_str);
                Some(format!("  {name}: part {part}/{parts}, {bytes_written} bytes"))
            }
            AppEvent::Download(DownloadEvent::Completed {
                file_id, path, ..
            }) => {
                self.names.remove(&file_id);
                Some(format!("{} {}", style("Saved").green(), path.display()))
            }
            AppEvent::Download(DownloadEvent::Failed {
                file_id,
                file_name,
                failure,
            }) => {
                self.names.remove(&file_id);
                let mut line = format!("{} {file_name}: {}", style("Failed").red(), failure.message);
                if let Some(hint) = failure.hint {
                    line.push_str(&format!("\n  Hint: {hint}"));
                }
                Some(line)
            }
            AppEvent::General(_) => None,
        }
    }
}
