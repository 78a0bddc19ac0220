//! Error types for the filesum core library
//!
//! Setup errors (`Validation`) are returned synchronously from start calls
//! and never enter a running job; I/O failures during a run are delivered
//! through the event protocol as a `Failed` outcome instead of being
//! propagated past the pipeline boundary.

use thiserror::Error;

pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the filesum core library
#[derive(Error, Debug)]
pub enum Error {
    /// File system I/O errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Input validation and configuration errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::classify(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestAlgorithm;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_file_not_found_error_creation() {
        let path = Path::new("/non/existent/input.bin");
        let error = Error::Io(IoError::not_found(path));

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
                assert_eq!(io_err.path, Some(path.to_path_buf()));
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_from_std_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error: Error = io_error.into();

        match error {
            Error::Io(io_err) => assert_eq!(io_err.kind, IoErrorKind::FileNotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_validation_errors_display() {
        let errors = vec![
            Error::Validation(ValidationError::NoAlgorithmsSelected),
            Error::Validation(ValidationError::AlreadyRunning),
            Error::Validation(ValidationError::EmptyBatch),
            Error::Validation(ValidationError::unsupported_mode(DigestAlgorithm::Crc32)),
            Error::Validation(ValidationError::unknown_algorithm("whirlpool")),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_error_source_chain() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = Error::Io(IoError::classify(source).with_path(Path::new("/root/locked.bin")));

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/root/locked.bin"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
