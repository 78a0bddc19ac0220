//! Core traits for digest engines and their per-run streaming state

use crate::digest::DigestAlgorithm;
use crate::error::Result;

/// A build-time digest algorithm implementation.
///
/// Engines are stateless and shared; all per-run state lives in the
/// [`StreamingDigest`] values they create, one per file per run.
pub trait DigestEngine: Send + Sync {
    /// The algorithm this engine implements
    fn algorithm(&self) -> DigestAlgorithm;

    /// Display name for user interfaces
    fn display_name(&self) -> &'static str;

    /// Length of the finalized digest in bytes
    fn digest_len(&self) -> usize;

    /// Whether the algorithm supports keyed (HMAC) hashing
    fn supports_keyed(&self) -> bool;

    /// Create fresh streaming state, keyed if `key` is given.
    ///
    /// Fails with `UnsupportedMode` when a key is supplied and
    /// [`supports_keyed`](Self::supports_keyed) is false.
    fn new_state(&self, key: Option<&[u8]>) -> Result<Box<dyn StreamingDigest>>;
}

/// Incremental digest state over a byte stream.
///
/// `update` calls must receive the input bytes in order; `finalize`
/// consumes the state, so a finalized digest cannot be updated again.
pub trait StreamingDigest: Send {
    /// Feed the next run of input bytes
    fn update(&mut self, data: &[u8]);

    /// Consume the state and return the raw digest bytes
    fn finalize(self: Box<Self>) -> Vec<u8>;
}
