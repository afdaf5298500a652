//! Error type definitions for the photo gallery

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level gallery error type
///
/// Variants map one-to-one onto the failure modes callers are expected to
/// handle differently; the web layer turns each into a status code.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The listing pattern is not a valid regular expression
    #[error("Invalid regex: {pattern} - {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The folder to scan does not exist or is not a directory
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The requested file does not exist or is not a regular file
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A preview cannot be produced and the source is not a servable image
    #[error("Unsupported format: {} - {message}", path.display())]
    UnsupportedFormat { path: PathBuf, message: String },

    /// Malformed input at the request boundary
    #[error("Invalid request: {field} - {message}")]
    InvalidRequest { field: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A blocking worker panicked or the pool was shut down
    #[error("Worker error: {message}")]
    Worker { message: String },

    /// Filesystem read/write failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GalleryError {
    /// Create an invalid pattern error from a regex compile failure
    pub fn invalid_pattern<S: Into<String>, E: std::fmt::Display>(pattern: S, error: E) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: error.to_string(),
        }
    }

    pub fn directory_not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::DirectoryNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn unsupported_format<P: AsRef<Path>, M: Into<String>>(path: P, message: M) -> Self {
        Self::UnsupportedFormat {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an invalid request error for a named input field
    pub fn invalid_request<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn worker<S: Into<String>>(message: S) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern { .. }
                | Self::DirectoryNotFound { .. }
                | Self::NotFound { .. }
                | Self::UnsupportedFormat { .. }
                | Self::InvalidRequest { .. }
        )
    }
}
