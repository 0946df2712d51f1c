//! Data models shared across RECITAL crates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::naming;

/// A roster entry. Supplied externally (roster file) and read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
}

/// A recording as reconstructed from a stored blob's filename and metadata.
///
/// Not independently persisted: this is a view over the blob store's
/// contents, rebuilt on every listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Base filename as stored, e.g. `ClassA-Jane Doe-20240305.webm`
    pub name: String,
    /// Token before the first `-`, or `Unknown Class`
    pub class: String,
    /// Playback URL (public base + WebDAV path); never validated
    pub url: String,
    /// Last-modified timestamp from the store, passed through unmodified
    pub created_at: DateTime<Utc>,
    /// Optional free-text note attached to the blob
    #[serde(default)]
    pub message: String,
}

impl Recording {
    /// Student name parsed from the stored filename: the trimmed token
    /// between the first and second `-`, or `Unknown Student` when the
    /// filename has no separator.
    pub fn student_name(&self) -> &str {
        naming::student_token(&self.name)
            .map(str::trim)
            .unwrap_or(naming::UNKNOWN_STUDENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(name: &str) -> Recording {
        Recording {
            name: name.to_string(),
            class: "ClassA".to_string(),
            url: String::new(),
            created_at: Utc::now(),
            message: String::new(),
        }
    }

    #[test]
    fn student_name_is_second_token_trimmed() {
        assert_eq!(
            recording("ClassA-Jane Doe-20240305.webm").student_name(),
            "Jane Doe"
        );
        assert_eq!(recording("ClassA- Sam Lee -x").student_name(), "Sam Lee");
    }

    #[test]
    fn student_name_without_separator_is_sentinel() {
        assert_eq!(recording("voicememo.webm").student_name(), "Unknown Student");
    }
}
