//! Calendar-week bucketing of recordings
//!
//! Weeks are Sunday-aligned and keyed by the ISO `YYYY-MM-DD` date of the
//! week start. Buckets are recomputed on every call; nothing here caches.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::model::Recording;

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_sunday = date.weekday().num_days_from_sunday() as u64;
    date - Days::new(days_from_sunday)
}

/// ISO `YYYY-MM-DD` week key for a recording, from its last-modified date
/// (UTC calendar day).
pub fn week_key(recording: &Recording) -> String {
    week_start(recording.created_at.date_naive())
        .format("%Y-%m-%d")
        .to_string()
}

/// Group recordings into disjoint week buckets keyed by week start.
///
/// Covers exactly the weeks present in the input; an empty input yields an
/// empty map.
pub fn bucket(recordings: &[Recording]) -> BTreeMap<String, Vec<Recording>> {
    let mut buckets: BTreeMap<String, Vec<Recording>> = BTreeMap::new();
    for recording in recordings {
        buckets
            .entry(week_key(recording))
            .or_default()
            .push(recording.clone());
    }
    buckets
}

/// Bucket keys ordered most-recent-first.
pub fn sorted_week_keys(buckets: &BTreeMap<String, Vec<Recording>>) -> Vec<String> {
    // ISO date keys sort lexicographically in chronological order
    buckets.keys().rev().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_on(date: &str) -> Recording {
        let created_at = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        Recording {
            name: format!("ClassA-Jane Doe-{}.webm", date.replace('-', "")),
            class: "ClassA".to_string(),
            url: String::new(),
            created_at,
            message: String::new(),
        }
    }

    #[test]
    fn week_start_of_a_sunday_is_itself() {
        // 2024-03-03 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn week_start_rolls_back_to_previous_sunday() {
        // 2024-03-05 is a Tuesday
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(week_start(tuesday), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        // Saturday belongs to the same week
        let saturday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(week_start(saturday), NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn buckets_are_disjoint_and_cover_all_weeks() {
        let recordings = vec![
            recording_on("2024-03-04"),
            recording_on("2024-03-08"),
            recording_on("2024-03-12"),
        ];
        let buckets = bucket(&recordings);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets["2024-03-03"].len(), 2);
        assert_eq!(buckets["2024-03-10"].len(), 1);
        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, recordings.len());
    }

    #[test]
    fn bucketing_is_idempotent() {
        let recordings = vec![
            recording_on("2024-03-04"),
            recording_on("2024-03-08"),
            recording_on("2024-03-12"),
        ];
        let first = bucket(&recordings);
        let flattened: Vec<Recording> = first.values().flatten().cloned().collect();
        assert_eq!(bucket(&flattened), first);
    }

    #[test]
    fn week_keys_sort_most_recent_first() {
        let recordings = vec![
            recording_on("2024-03-04"),
            recording_on("2024-03-12"),
            recording_on("2024-02-20"),
        ];
        let buckets = bucket(&recordings);
        assert_eq!(
            sorted_week_keys(&buckets),
            vec!["2024-03-10", "2024-03-03", "2024-02-18"]
        );
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(bucket(&[]).is_empty());
    }
}
