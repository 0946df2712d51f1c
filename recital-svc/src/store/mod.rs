//! Blob store abstraction
//!
//! The remote file store is reached through an explicitly constructed
//! handle held in the application state, never a module-global client, so
//! handlers stay testable against an in-memory double.

pub mod memory;
pub mod webdav;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recital_common::Result;

pub use memory::MemoryStore;
pub use webdav::WebDavStore;

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Remote path relative to the store root, e.g.
    /// `/Recordings/ClassA-Jane Doe-20240305.webm`
    pub path: String,
    /// Base filename without directories
    pub base_name: String,
    /// False for collection (directory) entries
    pub is_file: bool,
    /// MIME content type as reported by the store; empty when unknown
    pub content_type: String,
    /// Last-modified timestamp reported by the store
    pub last_modified: DateTime<Utc>,
    /// Optional free-text `message` property; empty when the store reports
    /// none
    pub message: String,
}

/// A remote file store with list/put semantics.
///
/// Errors map to the common taxonomy: an absent directory is
/// `Error::NotFound`, an unreachable store or malformed response is
/// `Error::Upstream`. Concurrent puts to distinct paths need no
/// coordination; a put to an existing path overwrites it.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List the immediate children of a remote directory.
    async fn list(&self, dir: &str) -> Result<Vec<FileEntry>>;

    /// Write `bytes` at `path`, overwriting any existing blob.
    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()>;

    /// Whether a remote path exists.
    async fn exists(&self, path: &str) -> Result<bool>;
}
