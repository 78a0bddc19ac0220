//! Validation and configuration error types

use crate::digest::DigestAlgorithm;
use thiserror::Error;

/// Errors returned synchronously from start calls; none of these leave a
/// job in the running state.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A computation was started with every algorithm disabled
    #[error("no digest algorithms are enabled")]
    NoAlgorithmsSelected,

    /// A second batch was started while one is active
    #[error("a hashing run is already in progress")]
    AlreadyRunning,

    /// A batch was started with no files queued
    #[error("batch contains no files")]
    EmptyBatch,

    /// Keyed (HMAC) hashing was requested for an algorithm without it
    #[error("algorithm {algorithm} does not support keyed hashing")]
    UnsupportedMode { algorithm: DigestAlgorithm },

    /// An algorithm name failed to parse
    #[error("unknown digest algorithm: {name}")]
    UnknownAlgorithm { name: String },

    /// An output format name failed to parse
    #[error("unknown digest format: {name}")]
    UnknownFormat { name: String },
}

impl ValidationError {
    pub fn unsupported_mode(algorithm: DigestAlgorithm) -> Self {
        Self::UnsupportedMode { algorithm }
    }

    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }

    pub fn unknown_format(name: &str) -> Self {
        Self::UnknownFormat {
            name: name.to_string(),
        }
    }
}
