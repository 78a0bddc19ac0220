//! Streaming file reader
//!
//! Reads one file in fixed-size chunks, feeds every chunk to all digest
//! states in read order, reports progress once per chunk and honors
//! cooperative cancellation at chunk boundaries. Memory use is one chunk
//! buffer plus digest state, independent of file size.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, warn};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::digest::{DigestEngine, DigestFormat, DigestResult, format_digest};
use crate::error::{Error, IoError};
use crate::events::{EventSink, FileOutcome, ProgressSnapshot};

/// One file under computation: location plus the settings snapshot taken
/// when the run started. Digest state is allocated fresh from `engines`
/// for this job only and dropped with it.
pub struct FileJob {
    pub path: PathBuf,
    pub engines: Vec<Arc<dyn DigestEngine>>,
    pub format: DigestFormat,
    pub hmac_key: Option<Vec<u8>>,
}

/// Drive one job to a terminal state.
///
/// Emits progress and digest-ready events on `sink`; the caller emits the
/// terminal `on_file_finished` from the returned outcome so that ordering
/// across queued files stays in one place.
pub(crate) async fn run_file_job(
    job: &FileJob,
    chunk_size: usize,
    cancel: &AtomicBool,
    sink: &dyn EventSink,
) -> FileOutcome {
    let mut states = Vec::with_capacity(job.engines.len());
    for engine in &job.engines {
        match engine.new_state(job.hmac_key.as_deref()) {
            Ok(state) => states.push(state),
            Err(e) => return FileOutcome::Failed(e),
        }
    }

    let mut file = match File::open(&job.path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("failed to open {}: {e}", job.path.display());
            return FileOutcome::Failed(Error::Io(IoError::classify(e).with_path(&job.path)));
        }
    };

    let total_bytes = match file.metadata().await {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            return FileOutcome::Failed(Error::Io(IoError::classify(e).with_path(&job.path)));
        }
    };

    debug!(
        "hashing {} ({total_bytes} bytes, {} algorithms)",
        job.path.display(),
        job.engines.len()
    );

    let start = Instant::now();
    let mut buffer = vec![0u8; chunk_size];
    let mut bytes_read = 0u64;

    loop {
        if cancel.load(Ordering::Acquire) {
            debug!("cancelled while reading {}", job.path.display());
            return FileOutcome::Cancelled;
        }

        let n = match file.read(&mut buffer).await {
            Ok(n) => n,
            Err(e) => {
                warn!("read failure on {}: {e}", job.path.display());
                return FileOutcome::Failed(Error::Io(IoError::classify(e).with_path(&job.path)));
            }
        };
        if n == 0 {
            break;
        }

        // Order matters: every state sees the chunks in read order
        for state in &mut states {
            state.update(&buffer[..n]);
        }
        bytes_read += n as u64;

        sink.on_progress(&ProgressSnapshot {
            path: job.path.clone(),
            bytes_read,
            total_bytes,
            elapsed: start.elapsed(),
        });
    }

    for (engine, state) in job.engines.iter().zip(states) {
        let raw = state.finalize();
        let result = DigestResult {
            algorithm: engine.algorithm(),
            digest: format_digest(&raw, job.format),
        };
        sink.on_digest_ready(&job.path, &result);
    }

    FileOutcome::Finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{AlgorithmRegistry, DigestAlgorithm};
    use crate::error::IoErrorKind;
    use crate::events::MemorySink;

    fn job_for(path: PathBuf) -> FileJob {
        let registry = AlgorithmRegistry::with_builtins();
        FileJob {
            path,
            engines: registry.enabled(),
            format: DigestFormat::HexLower,
            hmac_key: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_failed_not_panic() {
        let sink = MemorySink::new();
        let cancel = AtomicBool::new(false);
        let job = job_for(PathBuf::from("/no/such/file.bin"));

        let outcome = run_file_job(&job, 1024, &cancel, &sink).await;

        match outcome {
            FileOutcome::Failed(Error::Io(io_err)) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
            }
            other => panic!("expected Failed(Io), got {other:?}"),
        }
        assert!(sink.digests().is_empty());
        assert_eq!(sink.progress_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_file_emits_empty_input_digests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        std::fs::write(&path, b"").unwrap();

        let sink = MemorySink::new();
        let cancel = AtomicBool::new(false);
        let job = job_for(path);

        let outcome = run_file_job(&job, 1024, &cancel, &sink).await;

        assert!(matches!(outcome, FileOutcome::Finished));
        let digests = sink.digests();
        assert_eq!(digests.len(), 3);
        let md5 = digests
            .iter()
            .find(|(_, r)| r.algorithm == DigestAlgorithm::Md5)
            .unwrap();
        assert_eq!(md5.1.digest, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[tokio::test]
    async fn test_cancel_before_first_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, vec![0x42u8; 8192]).unwrap();

        let sink = MemorySink::new();
        let cancel = AtomicBool::new(true);
        let job = job_for(path);

        let outcome = run_file_job(&job, 1024, &cancel, &sink).await;

        assert!(matches!(outcome, FileOutcome::Cancelled));
        assert!(sink.digests().is_empty());
        assert_eq!(sink.progress_count(), 0);
    }

    #[tokio::test]
    async fn test_progress_once_per_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, vec![0x42u8; 10 * 1024]).unwrap();

        let sink = MemorySink::new();
        let cancel = AtomicBool::new(false);
        let job = job_for(path);

        let outcome = run_file_job(&job, 1024, &cancel, &sink).await;

        assert!(matches!(outcome, FileOutcome::Finished));
        // 10 KiB in 1 KiB chunks: one progress event per chunk
        assert_eq!(sink.progress_count(), 10);
    }
}
