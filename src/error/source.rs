//! Source file error module.
//!
//! This module defines the errors raised while reading keyword and defect
//! text files or writing exports. A missing file is kept apart from every
//! other I/O failure so callers can report it as such.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing source files.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Error when the source file does not exist.
    #[error("Source file not found: {0}")]
    NotFound(PathBuf),

    /// Error when the source file exists but cannot be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The file being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when an output file cannot be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// The file being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when writing a keyword file back would lose lines it holds.
    #[error(
        "Refusing to overwrite {path}: lines {lines:?} would be dropped or rewritten; \
         use --force to overwrite anyway"
    )]
    LossyOverwrite {
        /// The keyword file
        path: PathBuf,
        /// 1-based line numbers that would not survive
        lines: Vec<usize>,
    },
}

impl SourceError {
    /// Classifies an I/O error raised while reading `path`.
    pub fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wraps an I/O error raised while writing `path`.
    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for source file operations.
pub type SourceResult<T> = Result<T, SourceError>;
