//! Upload naming and filename token rules
//!
//! A stored recording's identity is encoded in its filename as
//! `<classroom>-<student>-<YYYYMMDD><ext>`. The token rules here are the
//! single source of truth for both deriving names at upload time and
//! parsing them back at listing time.
//!
//! Known limitation: the encoding breaks for names containing `-`.

use chrono::NaiveDate;

/// Classroom token used when the submitted classroom is empty
pub const FALLBACK_CLASSROOM: &str = "class";

/// Sentinel class tag for filenames with no `-` separator
pub const UNKNOWN_CLASS: &str = "Unknown Class";

/// Sentinel student name for filenames with no `-` separator
pub const UNKNOWN_STUDENT: &str = "Unknown Student";

/// Derive the canonical upload filename stem (no extension) from classroom,
/// student name, and the **local** calendar day.
///
/// The local day, not UTC, so that a student submitting late in the evening
/// is not filed under the next day. The caller appends the audio extension.
pub fn upload_file_name(classroom: &str, student_name: &str, date: NaiveDate) -> String {
    let classroom = if classroom.is_empty() {
        FALLBACK_CLASSROOM
    } else {
        classroom
    };
    format!("{}-{}-{}", classroom, student_name, date.format("%Y%m%d"))
}

/// Class tag of a stored base filename: the token before the first `-`,
/// or [`UNKNOWN_CLASS`] when the filename has no separator.
pub fn class_tag(base_name: &str) -> &str {
    match base_name.find('-') {
        Some(idx) => &base_name[..idx],
        None => UNKNOWN_CLASS,
    }
}

/// Student token of a stored base filename: the token between the first
/// and second `-`. `None` when the filename has no separator; trimming and
/// the [`UNKNOWN_STUDENT`] fallback are the caller's concern.
pub fn student_token(base_name: &str) -> Option<&str> {
    base_name.splitn(3, '-').nth(1)
}
