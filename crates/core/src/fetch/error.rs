//! Error types for the fetch collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from page, detail, and transfer fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not reach the catalog at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The catalog answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The page did not contain the expected markup.
    #[error("Failed to parse page: {0}")]
    Parse(String),

    /// The detail page has no downloadable asset.
    #[error("No downloadable asset found")]
    NotFound,

    /// The request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Writing the transferred bytes to disk failed.
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from destination directory provisioning.
///
/// Provisioning runs before any download starts; all variants are fatal to
/// the batch.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The path exists but is a file, not a directory.
    #[error("Path exists and is not a directory: {0}")]
    AlreadyAFile(PathBuf),

    /// The directory could not be created due to permissions.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path is not usable as a directory (e.g. empty or malformed).
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),

    /// Any other I/O failure while creating the directory.
    #[error("Failed to create directory {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
