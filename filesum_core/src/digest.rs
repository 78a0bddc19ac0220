//! Digest computation: algorithm identifiers, engines and output formats
//!
//! The algorithm set is fixed at build time. Per-run streaming state is
//! created through [`DigestEngine::new_state`] and is never shared between
//! files; see [`crate::reader`] for the streaming loop that feeds it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationError};

mod algorithms;
pub mod format;
mod registry;
mod traits;

pub use format::format_digest;
pub use registry::AlgorithmRegistry;
pub use traits::{DigestEngine, StreamingDigest};

/// Digest algorithms supported by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// CRC32 checksum (IEEE polynomial)
    Crc32,
    /// MD4 digest
    Md4,
    /// MD5 digest
    Md5,
    /// SHA-1 digest
    Sha1,
    /// SHA-256 digest
    Sha256,
    /// SHA-512 digest
    Sha512,
}

impl DigestAlgorithm {
    /// All build-time algorithms in registration order
    pub const ALL: [DigestAlgorithm; 6] = [
        DigestAlgorithm::Crc32,
        DigestAlgorithm::Md4,
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha512,
    ];

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Crc32 => "crc32",
            DigestAlgorithm::Md4 => "md4",
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Human-facing name for labels and result listings
    pub fn display_name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Crc32 => "CRC32",
            DigestAlgorithm::Md4 => "MD4",
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "crc32" => Ok(DigestAlgorithm::Crc32),
            "md4" => Ok(DigestAlgorithm::Md4),
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha1" | "sha-1" => Ok(DigestAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(Error::Validation(ValidationError::unknown_algorithm(s))),
        }
    }
}

/// Output encoding for a finalized digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestFormat {
    /// Lowercase hexadecimal, two characters per byte
    HexLower,
    /// Uppercase hexadecimal, two characters per byte
    HexUpper,
    /// RFC 4648 Base64 with padding
    Base64,
}

impl std::fmt::Display for DigestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DigestFormat::HexLower => "hex-lower",
            DigestFormat::HexUpper => "hex-upper",
            DigestFormat::Base64 => "base64",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for DigestFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hex" | "hex-lower" => Ok(DigestFormat::HexLower),
            "hex-upper" => Ok(DigestFormat::HexUpper),
            "base64" => Ok(DigestFormat::Base64),
            _ => Err(Error::Validation(ValidationError::unknown_format(s))),
        }
    }
}

/// One formatted digest for one algorithm over one input; never mutated
/// after emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestResult {
    pub algorithm: DigestAlgorithm,
    pub digest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_roundtrip() {
        for algorithm in DigestAlgorithm::ALL {
            let parsed: DigestAlgorithm = algorithm.as_str().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn test_algorithm_parse_aliases() {
        assert_eq!(
            "SHA-256".parse::<DigestAlgorithm>().unwrap(),
            DigestAlgorithm::Sha256
        );
        assert_eq!(
            "MD5".parse::<DigestAlgorithm>().unwrap(),
            DigestAlgorithm::Md5
        );
    }

    #[test]
    fn test_algorithm_parse_unknown() {
        let err = "whirlpool".parse::<DigestAlgorithm>().unwrap_err();
        assert!(err.to_string().contains("whirlpool"));
    }

    #[test]
    fn test_format_roundtrip() {
        for format in [
            DigestFormat::HexLower,
            DigestFormat::HexUpper,
            DigestFormat::Base64,
        ] {
            let parsed: DigestFormat = format.to_string().parse().unwrap();
            assert_eq!(parsed, format);
        }
        assert_eq!("hex".parse::<DigestFormat>().unwrap(), DigestFormat::HexLower);
    }

    #[test]
    fn test_result_serialization() {
        let result = DigestResult {
            algorithm: DigestAlgorithm::Sha256,
            digest: "deadbeef".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("Sha256"));
        assert!(json.contains("deadbeef"));

        let back: DigestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
