//! Recording catalog
//!
//! Turns a raw directory listing into structured [`Recording`] records.
//! Only media entries survive; identity comes from the filename token
//! rules in `recital_common::naming`.

use recital_common::model::Recording;
use recital_common::naming;

use crate::store::FileEntry;

/// Parse a directory listing into recordings.
///
/// Entries are kept when they are files whose content type starts with
/// `audio/` or equals `video/webm` (the browser's recording container);
/// directories and non-media files are silently excluded. Playback URLs
/// are `public_base` + remote path, unvalidated.
pub fn parse(entries: &[FileEntry], public_base: &str) -> Vec<Recording> {
    let public_base = public_base.trim_end_matches('/');
    entries
        .iter()
        .filter(|entry| entry.is_file && is_media(&entry.content_type))
        .map(|entry| Recording {
            name: entry.base_name.clone(),
            class: naming::class_tag(&entry.base_name).to_string(),
            url: format!("{}{}", public_base, entry.path),
            created_at: entry.last_modified,
            message: entry.message.clone(),
        })
        .collect()
}

fn is_media(content_type: &str) -> bool {
    content_type.starts_with("audio/") || content_type == "video/webm"
}
