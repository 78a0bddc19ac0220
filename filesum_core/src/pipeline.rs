//! Multi-file batch driver
//!
//! [`HashPipeline`] owns the algorithm registry, output format, HMAC key
//! and run state. Batches are processed strictly one file at a time on a
//! background tokio task; settings are snapshotted when a run starts, so
//! registry changes never affect a batch in flight. At most one run may be
//! active per pipeline.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::PipelineConfig;
use crate::digest::{AlgorithmRegistry, DigestEngine, DigestFormat, DigestResult, format_digest};
use crate::error::{Result, ValidationError};
use crate::events::{BatchOutcome, EventSink, FileOutcome};
use crate::reader::{FileJob, run_file_job};

pub struct HashPipeline {
    registry: AlgorithmRegistry,
    config: PipelineConfig,
    format: DigestFormat,
    hmac_key: Option<Vec<u8>>,
    active: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
}

/// Handle to a running single or batch computation
#[derive(Debug)]
pub struct RunHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl RunHandle {
    /// Wait for the worker task to drain; all events have been delivered
    /// to the sink once this returns.
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

/// Clears the active flag when the worker exits, normally or not
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl HashPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_registry(AlgorithmRegistry::with_builtins(), config)
    }

    pub fn with_registry(registry: AlgorithmRegistry, config: PipelineConfig) -> Self {
        Self {
            registry,
            config,
            format: DigestFormat::HexLower,
            hmac_key: None,
            active: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Mutable registry access. Changes apply to runs started afterwards;
    /// an active run keeps the snapshot it started with.
    pub fn registry_mut(&mut self) -> &mut AlgorithmRegistry {
        &mut self.registry
    }

    pub fn format(&self) -> DigestFormat {
        self.format
    }

    pub fn set_format(&mut self, format: DigestFormat) {
        self.format = format;
    }

    /// Set or clear the HMAC key used by future runs
    pub fn set_hmac_key(&mut self, key: Option<Vec<u8>>) {
        self.hmac_key = key;
    }

    /// Hash a single file. Cancelling yields `on_file_finished(Cancelled)`;
    /// no batch-finished event is emitted for single runs.
    pub fn start_single(
        &self,
        location: impl Into<PathBuf>,
        sink: Arc<dyn EventSink>,
    ) -> Result<RunHandle> {
        self.start(vec![location.into()], sink, false)
    }

    /// Hash an ordered batch of files, FIFO. Settings are snapshotted
    /// once, up front, and shared by every file in the batch.
    pub fn start_batch(&self, locations: Vec<PathBuf>, sink: Arc<dyn EventSink>) -> Result<RunHandle> {
        if locations.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }
        self.start(locations, sink, true)
    }

    fn start(
        &self,
        locations: Vec<PathBuf>,
        sink: Arc<dyn EventSink>,
        batch: bool,
    ) -> Result<RunHandle> {
        let (engines, format, hmac_key) = self.snapshot_settings()?;

        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ValidationError::AlreadyRunning.into());
        }
        let guard = ActiveGuard(Arc::clone(&self.active));
        self.cancel.store(false, Ordering::Release);

        let cancel = Arc::clone(&self.cancel);
        let chunk_size = self.config.chunk_size.max(1);
        info!(
            "starting {} run over {} file(s) with {} algorithm(s)",
            if batch { "batch" } else { "single" },
            locations.len(),
            engines.len()
        );

        let handle = tokio::spawn(async move {
            let _guard = guard;
            let mut queue: VecDeque<PathBuf> = locations.into();
            let mut cancelled = false;

            while let Some(path) = queue.pop_front() {
                let job = FileJob {
                    path,
                    engines: engines.clone(),
                    format,
                    hmac_key: hmac_key.clone(),
                };
                let outcome = run_file_job(&job, chunk_size, &cancel, sink.as_ref()).await;
                let was_cancelled = matches!(outcome, FileOutcome::Cancelled);
                sink.on_file_finished(&job.path, &outcome);

                if was_cancelled {
                    // Remaining queued files never start
                    queue.clear();
                    cancelled = true;
                    break;
                }
            }

            if batch {
                let outcome = if cancelled {
                    BatchOutcome::Cancelled
                } else {
                    BatchOutcome::Completed
                };
                debug!("batch finished: {outcome:?}");
                sink.on_batch_finished(outcome);
            }
        });

        Ok(RunHandle { handle })
    }

    /// Request cooperative cancellation of the active run. The reader
    /// stops at the next chunk boundary; no partial digest is emitted.
    pub fn cancel(&self) {
        debug!("cancellation requested");
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Digest an in-memory string with the current settings, synchronously
    pub fn hash_text(&self, text: &str) -> Result<Vec<DigestResult>> {
        let (engines, format, hmac_key) = self.snapshot_settings()?;

        let mut results = Vec::with_capacity(engines.len());
        for engine in engines {
            let mut state = engine.new_state(hmac_key.as_deref())?;
            state.update(text.as_bytes());
            results.push(DigestResult {
                algorithm: engine.algorithm(),
                digest: format_digest(&state.finalize(), format),
            });
        }
        Ok(results)
    }

    /// Validate settings and snapshot them for one run
    fn snapshot_settings(
        &self,
    ) -> Result<(Vec<Arc<dyn DigestEngine>>, DigestFormat, Option<Vec<u8>>)> {
        let engines = self.registry.enabled();
        if engines.is_empty() {
            return Err(ValidationError::NoAlgorithmsSelected.into());
        }
        if self.hmac_key.is_some() {
            for engine in &engines {
                if !engine.supports_keyed() {
                    return Err(ValidationError::unsupported_mode(engine.algorithm()).into());
                }
            }
        }
        Ok((engines, self.format, self.hmac_key.clone()))
    }
}

impl Default for HashPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestAlgorithm;
    use crate::error::Error;

    #[test]
    fn test_hash_text_known_vectors() {
        let pipeline = HashPipeline::default();
        let results = pipeline.hash_text("abc").unwrap();

        // Defaults: MD5, SHA-1, SHA-256 in registration order
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].algorithm, DigestAlgorithm::Md5);
        assert_eq!(results[0].digest, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(results[1].algorithm, DigestAlgorithm::Sha1);
        assert_eq!(results[1].digest, "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(results[2].algorithm, DigestAlgorithm::Sha256);
        assert_eq!(
            results[2].digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_text_respects_format() {
        let mut pipeline = HashPipeline::default();
        pipeline.registry_mut().enable_only(&[DigestAlgorithm::Md5]);
        pipeline.set_format(DigestFormat::HexUpper);

        let results = pipeline.hash_text("abc").unwrap();
        assert_eq!(results[0].digest, "900150983CD24FB0D6963F7D28E17F72");
    }

    #[test]
    fn test_no_algorithms_selected() {
        let mut pipeline = HashPipeline::default();
        pipeline.registry_mut().enable_only(&[]);

        let err = pipeline.hash_text("abc").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NoAlgorithmsSelected)
        ));
    }

    #[test]
    fn test_hmac_key_with_crc32_rejected() {
        let mut pipeline = HashPipeline::default();
        pipeline
            .registry_mut()
            .enable_only(&[DigestAlgorithm::Crc32, DigestAlgorithm::Sha256]);
        pipeline.set_hmac_key(Some(b"secret".to_vec()));

        let err = pipeline.hash_text("abc").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnsupportedMode {
                algorithm: DigestAlgorithm::Crc32
            })
        ));
    }

    #[test]
    fn test_hash_text_keyed_vector() {
        let mut pipeline = HashPipeline::default();
        pipeline.registry_mut().enable_only(&[DigestAlgorithm::Sha256]);
        pipeline.set_hmac_key(Some(b"key".to_vec()));

        let results = pipeline
            .hash_text("The quick brown fox jumps over the lazy dog")
            .unwrap();
        assert_eq!(
            results[0].digest,
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }
}
