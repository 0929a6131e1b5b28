//! Error handling module for mbpatch
//!
//! Provides centralized error handling with proper error types using thiserror.
//! The rewriting passes themselves never fail; every variant here belongs to
//! the boundary (file access, rule compilation).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mbpatch
#[derive(Error, Debug)]
pub enum PatcherError {
    /// IO errors while reading or writing a ROM file
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rewrite rule or filename pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for mbpatch operations
pub type Result<T> = std::result::Result<T, PatcherError>;

impl PatcherError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
