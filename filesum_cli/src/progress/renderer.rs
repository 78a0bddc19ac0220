//! Terminal rendering of pipeline events
//!
//! One progress bar at a time: the pipeline hashes one file at a time, so
//! the bar always shows the active file.

use colored::*;
use filesum_core::{BatchOutcome, FileStatus, PipelineEvent, ProgressSnapshot};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedReceiver;

use super::utils::format_bytes;
use crate::output::RunReport;

/// Drain the event channel, drive the progress display and build the
/// final report. Returns once the pipeline drops its sink.
pub async fn collect_events(
    mut rx: UnboundedReceiver<PipelineEvent>,
    show_progress: bool,
) -> RunReport {
    let mut renderer = ProgressRenderer::new(show_progress);
    let mut report = RunReport::default();

    while let Some(event) = rx.recv().await {
        match event {
            PipelineEvent::Progress(snapshot) => renderer.update(&snapshot),

            PipelineEvent::DigestReady { path, result } => {
                report.results.push((path, result));
            }

            PipelineEvent::FileFinished {
                path,
                status,
                error,
            } => {
                renderer.file_done(&path);
                match status {
                    FileStatus::Finished => {}
                    FileStatus::Cancelled => report.cancelled = true,
                    FileStatus::Failed => report.failures.push((
                        path,
                        error.unwrap_or_else(|| "unknown error".to_string()),
                    )),
                }
            }

            PipelineEvent::BatchFinished { outcome } => {
                if outcome == BatchOutcome::Cancelled {
                    report.cancelled = true;
                }
            }
        }
    }

    renderer.finish();
    report
}

struct ProgressRenderer {
    enabled: bool,
    current: Option<(PathBuf, ProgressBar)>,
}

impl ProgressRenderer {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: None,
        }
    }

    fn update(&mut self, snapshot: &ProgressSnapshot) {
        if !self.enabled {
            return;
        }

        let is_current = matches!(&self.current, Some((path, _)) if *path == snapshot.path);
        if !is_current {
            self.clear_current();

            let bar = ProgressBar::new(snapshot.total_bytes);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% | {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta}")
                    .unwrap()
                    .progress_chars("#>-"),
            );

            let file_name = snapshot
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown");
            bar.set_message(format!(
                "{}: {} ({})",
                "Hashing".bold(),
                file_name.cyan(),
                format_bytes(snapshot.total_bytes)
            ));

            self.current = Some((snapshot.path.clone(), bar));
        }

        if let Some((_, bar)) = &self.current {
            bar.set_position(snapshot.bytes_read);
        }
    }

    fn file_done(&mut self, path: &Path) {
        if let Some((current_path, _)) = &self.current
            && current_path == path
        {
            self.clear_current();
        }
    }

    fn clear_current(&mut self) {
        if let Some((_, bar)) = self.current.take() {
            bar.finish_and_clear();
        }
    }

    fn finish(mut self) {
        self.clear_current();
    }
}
