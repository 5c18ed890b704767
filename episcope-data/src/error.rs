//! Error types for dataset loading.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading an ensemble from disk.
///
/// Any error aborts the load of the enclosing entity; there is no partial
/// ensemble.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("malformed file {} (line {line}): {details}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        details: String,
    },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            what,
            path: path.into(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, line: usize, details: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            line,
            details: details.into(),
        }
    }

    /// Wrap an I/O error, mapping `NotFound` onto [`DatasetError::NotFound`].
    pub fn io(what: &'static str, path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(what, path)
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
