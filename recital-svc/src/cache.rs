//! Local recordings cache
//!
//! A flat JSON file holding a previously exported recording list, served
//! as an alternative data source when the live WebDAV listing is not
//! wanted. Read-only here; some external process maintains it.

use std::path::Path;

use recital_common::model::Recording;
use recital_common::{Error, Result};

/// Read the cached recording list.
///
/// A missing file is `NotFound`, unreadable or malformed content is
/// `Upstream`, never an empty success, so callers can tell "no cache"
/// from "no recordings".
pub fn read(path: &Path) -> Result<Vec<Recording>> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "Recordings cache {} not found",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Upstream(format!("Cannot read recordings cache: {}", e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Upstream(format!("Malformed recordings cache: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_a_recording_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "name": "ClassA-Jane Doe-20240305.webm",
                "class": "ClassA",
                "url": "https://cloud.example.org/remote.php/webdav/Recordings/ClassA-Jane Doe-20240305.webm",
                "created_at": "2024-03-05T09:30:00Z"
            }}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let recordings = read(file.path()).unwrap();
        assert_eq!(recordings.len(), 1);
        assert_eq!(recordings[0].class, "ClassA");
        assert_eq!(recordings[0].message, "");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read(Path::new("/no/such/cache.json")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_an_upstream_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        file.flush().unwrap();

        let err = read(file.path()).unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
