//! File system I/O error types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// I/O error carrying the affected path where known
#[derive(Error, Debug)]
#[error("{}", self.describe())]
pub struct IoError {
    /// The kind of I/O error
    pub kind: IoErrorKind,
    /// Path associated with the error (if any)
    pub path: Option<PathBuf>,
    /// Underlying I/O error (if any)
    #[source]
    pub source: Option<std::io::Error>,
}

/// Kind of I/O error, the error taxonomy exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    /// File not found
    FileNotFound,
    /// Permission denied
    PermissionDenied,
    /// Read failure or any other I/O error
    Other,
}

impl IoError {
    /// File-not-found error for a path that failed a pre-open check
    pub fn not_found(path: &Path) -> Self {
        Self {
            kind: IoErrorKind::FileNotFound,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Classify a standard I/O error into the pipeline taxonomy
    pub fn classify(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            path: None,
            source: Some(source),
        }
    }

    /// Attach the path the operation was acting on
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    fn describe(&self) -> String {
        let what = match self.kind {
            IoErrorKind::FileNotFound => "File not found",
            IoErrorKind::PermissionDenied => "Permission denied",
            IoErrorKind::Other => "I/O error",
        };
        match (&self.path, &self.source) {
            (Some(path), _) => format!("{what}: {}", path.display()),
            (None, Some(source)) => format!("{what}: {source}"),
            (None, None) => what.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found() {
        let error = IoError::not_found(Path::new("/data/missing.bin"));

        assert_eq!(error.kind, IoErrorKind::FileNotFound);
        assert!(error.source.is_none());
        assert!(error.to_string().contains("File not found"));
        assert!(error.to_string().contains("/data/missing.bin"));
    }

    #[test]
    fn test_classify_permission_denied() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = IoError::classify(source);

        assert_eq!(error.kind, IoErrorKind::PermissionDenied);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_classify_other() {
        let source = io::Error::other("disk on fire");
        let error = IoError::classify(source).with_path(Path::new("/data/a.bin"));

        assert_eq!(error.kind, IoErrorKind::Other);
        assert_eq!(error.path, Some(PathBuf::from("/data/a.bin")));
        assert!(error.to_string().contains("/data/a.bin"));
    }
}
