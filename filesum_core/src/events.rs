//! Progress and completion notification protocol
//!
//! The pipeline reports through an [`EventSink`] supplied by the caller;
//! any renderer (CLI, GUI, test harness) implements the trait. Per file
//! the protocol is: zero or more `on_progress` calls, then either one
//! `on_digest_ready` per enabled algorithm (in registration order)
//! followed by `on_file_finished(Finished)`, or no digest-ready events and
//! one `on_file_finished(Cancelled | Failed)`. Batch runs additionally end
//! with exactly one `on_batch_finished`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::digest::DigestResult;
use crate::error::Error;

/// Transient view of one file's read progress
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub path: PathBuf,
    pub bytes_read: u64,
    pub total_bytes: u64,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    /// Completed fraction in `0.0..=1.0`. Zero-byte files report 1.0
    /// rather than dividing by zero.
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            1.0
        } else {
            self.bytes_read as f64 / self.total_bytes as f64
        }
    }
}

/// Terminal state of one file job
#[derive(Debug)]
pub enum FileOutcome {
    /// All enabled digests were computed and delivered
    Finished,
    /// Cancelled before EOF; no digests were emitted
    Cancelled,
    /// Open or read failure; no digests were emitted
    Failed(Error),
}

impl FileOutcome {
    pub fn status(&self) -> FileStatus {
        match self {
            FileOutcome::Finished => FileStatus::Finished,
            FileOutcome::Cancelled => FileStatus::Cancelled,
            FileOutcome::Failed(_) => FileStatus::Failed,
        }
    }
}

/// Clonable tag for a [`FileOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Finished,
    Cancelled,
    Failed,
}

/// Terminal state of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every queued file reached a terminal state
    Completed,
    /// The batch was cancelled; remaining queued files never started
    Cancelled,
}

/// Event sink implemented by renderers.
///
/// Sinks are invoked from the pipeline's worker task and must not block
/// for long; they report to their own context rather than mutating
/// pipeline state.
pub trait EventSink: Send + Sync {
    fn on_progress(&self, snapshot: &ProgressSnapshot);

    fn on_digest_ready(&self, path: &Path, result: &DigestResult);

    fn on_file_finished(&self, path: &Path, outcome: &FileOutcome);

    fn on_batch_finished(&self, outcome: BatchOutcome);
}

/// Owned, clonable rendering of a sink callback, suitable for channel
/// transport and assertions.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Progress(ProgressSnapshot),
    DigestReady {
        path: PathBuf,
        result: DigestResult,
    },
    FileFinished {
        path: PathBuf,
        status: FileStatus,
        error: Option<String>,
    },
    BatchFinished {
        outcome: BatchOutcome,
    },
}

/// Discards all events
pub struct NullSink;

impl EventSink for NullSink {
    fn on_progress(&self, _snapshot: &ProgressSnapshot) {}

    fn on_digest_ready(&self, _path: &Path, _result: &DigestResult) {}

    fn on_file_finished(&self, _path: &Path, _outcome: &FileOutcome) {}

    fn on_batch_finished(&self, _outcome: BatchOutcome) {}
}

/// Forwards events over a tokio mpsc channel as [`PipelineEvent`] values.
///
/// Sends never block the read loop; a dropped receiver simply discards
/// further events.
pub struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<PipelineEvent>,
}

impl ChannelSink {
    pub fn new(tx: tokio::sync::mpsc::UnboundedSender<PipelineEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink and the receiver its events arrive on
    pub fn pair() -> (Self, tokio::sync::mpsc::UnboundedReceiver<PipelineEvent>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: PipelineEvent) {
        let _ = self.tx.send(event);
    }
}

impl EventSink for ChannelSink {
    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        self.send(PipelineEvent::Progress(snapshot.clone()));
    }

    fn on_digest_ready(&self, path: &Path, result: &DigestResult) {
        self.send(PipelineEvent::DigestReady {
            path: path.to_path_buf(),
            result: result.clone(),
        });
    }

    fn on_file_finished(&self, path: &Path, outcome: &FileOutcome) {
        let error = match outcome {
            FileOutcome::Failed(e) => Some(e.to_string()),
            _ => None,
        };
        self.send(PipelineEvent::FileFinished {
            path: path.to_path_buf(),
            status: outcome.status(),
            error,
        });
    }

    fn on_batch_finished(&self, outcome: BatchOutcome) {
        self.send(PipelineEvent::BatchFinished { outcome });
    }
}

/// Records every event in memory; the test-harness renderer.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far, in delivery order
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, PipelineEvent::Progress(_)))
            .count()
    }

    pub fn digests(&self) -> Vec<(PathBuf, DigestResult)> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::DigestReady { path, result } => {
                    Some((path.clone(), result.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn finished_files(&self) -> Vec<(PathBuf, FileStatus)> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::FileFinished { path, status, .. } => {
                    Some((path.clone(), *status))
                }
                _ => None,
            })
            .collect()
    }

    pub fn batch_outcome(&self) -> Option<BatchOutcome> {
        self.events().iter().rev().find_map(|e| match e {
            PipelineEvent::BatchFinished { outcome } => Some(*outcome),
            _ => None,
        })
    }
}

impl EventSink for MemorySink {
    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        self.events
            .lock()
            .unwrap()
            .push(PipelineEvent::Progress(snapshot.clone()));
    }

    fn on_digest_ready(&self, path: &Path, result: &DigestResult) {
        self.events.lock().unwrap().push(PipelineEvent::DigestReady {
            path: path.to_path_buf(),
            result: result.clone(),
        });
    }

    fn on_file_finished(&self, path: &Path, outcome: &FileOutcome) {
        let error = match outcome {
            FileOutcome::Failed(e) => Some(e.to_string()),
            _ => None,
        };
        self.events.lock().unwrap().push(PipelineEvent::FileFinished {
            path: path.to_path_buf(),
            status: outcome.status(),
            error,
        });
    }

    fn on_batch_finished(&self, outcome: BatchOutcome) {
        self.events
            .lock()
            .unwrap()
            .push(PipelineEvent::BatchFinished { outcome });
    }
}
