//! In-memory blob store double
//!
//! Backs the integration tests (and offline experimentation) with the same
//! surface as the WebDAV store, plus an outage switch so tests can exercise
//! the store-unreachable paths.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recital_common::{Error, Result};

use super::{BlobStore, FileEntry};

#[derive(Debug, Clone)]
struct Blob {
    bytes: Vec<u8>,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// In-memory [`BlobStore`] keyed by remote path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<BTreeMap<String, Blob>>,
    unreachable: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob with explicit content type and timestamp.
    pub fn insert(&self, path: &str, content_type: &str, last_modified: DateTime<Utc>) {
        self.blobs.lock().unwrap().insert(
            path.to_string(),
            Blob {
                bytes: Vec::new(),
                content_type: content_type.to_string(),
                last_modified,
            },
        );
    }

    /// Make every subsequent call fail with an upstream error.
    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    /// Bytes stored at `path`, if any.
    pub fn bytes_at(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(path).map(|b| b.bytes.clone())
    }

    fn check_reachable(&self) -> Result<()> {
        if *self.unreachable.lock().unwrap() {
            return Err(Error::Upstream("store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn list(&self, dir: &str) -> Result<Vec<FileEntry>> {
        self.check_reachable()?;
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let blobs = self.blobs.lock().unwrap();

        let entries: Vec<FileEntry> = blobs
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, blob)| {
                let rest = &path[prefix.len()..];
                // Immediate children only; deeper paths surface as their
                // top-level directory, the way a depth-1 PROPFIND would
                match rest.find('/') {
                    Some(idx) => FileEntry {
                        path: format!("{}{}", prefix, &rest[..idx]),
                        base_name: rest[..idx].to_string(),
                        is_file: false,
                        content_type: String::new(),
                        last_modified: blob.last_modified,
                        message: String::new(),
                    },
                    None => FileEntry {
                        path: path.clone(),
                        base_name: rest.to_string(),
                        is_file: true,
                        content_type: blob.content_type.clone(),
                        last_modified: blob.last_modified,
                        message: String::new(),
                    },
                }
            })
            .collect();

        // No directory objects in this model: a prefix nothing lives under
        // is an absent directory
        if entries.is_empty() {
            return Err(Error::NotFound(format!("Remote directory {} not found", dir)));
        }

        Ok(entries)
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        self.check_reachable()?;
        let mut blobs = self.blobs.lock().unwrap();
        let content_type = if path.ends_with(".webm") {
            "video/webm".to_string()
        } else {
            "application/octet-stream".to_string()
        };
        blobs.insert(
            path.to_string(),
            Blob {
                bytes,
                content_type,
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        self.check_reachable()?;
        let blobs = self.blobs.lock().unwrap();
        if blobs.contains_key(path) {
            return Ok(true);
        }
        // A directory exists when anything lives under it
        let prefix = format!("{}/", path.trim_end_matches('/'));
        Ok(blobs.keys().any(|p| p.starts_with(&prefix)))
    }
}
