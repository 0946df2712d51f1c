//! Common error types for RECITAL

use thiserror::Error;

/// Common result type for RECITAL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across RECITAL crates
#[derive(Error, Debug)]
pub enum Error {
    /// Requested resource not found (classroom, directory, cache file)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Blob store unreachable or returned a malformed response
    #[error("Upstream store error: {0}")]
    Upstream(String),

    /// Unparseable request payload or parameter
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
