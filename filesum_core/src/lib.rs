//! Filesum core library
//!
//! A sequential multi-file digest pipeline: streaming hash computation over
//! arbitrarily large files with progress reporting, cooperative
//! cancellation, multiple simultaneous digest algorithms and an optional
//! keyed (HMAC) mode.
//!
//! The entry point is [`HashPipeline`]. Callers configure an
//! [`AlgorithmRegistry`], pick a [`DigestFormat`] and optionally an HMAC
//! key, then drive single files or FIFO batches. Results and progress are
//! delivered through an [`EventSink`] implementation supplied by the
//! caller; `filesum_cli` renders them to a terminal, tests use
//! [`MemorySink`].

pub mod digest;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod reader;

// Re-export main types
pub use digest::{
    AlgorithmRegistry, DigestAlgorithm, DigestEngine, DigestFormat, DigestResult, StreamingDigest,
    format_digest,
};
pub use error::{Error, Result};
pub use events::{
    BatchOutcome, ChannelSink, EventSink, FileOutcome, FileStatus, MemorySink, NullSink,
    PipelineEvent, ProgressSnapshot,
};
pub use pipeline::{HashPipeline, RunHandle};
pub use reader::FileJob;

/// Core pipeline configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Read-loop chunk size in bytes. One progress event is emitted per
    /// chunk, so this also bounds progress granularity.
    pub chunk_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 256 * 1024,
        }
    }
}

impl PipelineConfig {
    /// Configuration for tests: tiny chunks so small fixture files still
    /// cross several chunk boundaries.
    pub fn test() -> Self {
        Self { chunk_size: 1024 }
    }
}
