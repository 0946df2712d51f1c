//! Class browsing and submission reconciliation API
//!
//! GET /api/classes (distinct class tags with counts) and
//! GET /api/classes/:class/submissions (the finished/unfinished view).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use recital_common::model::{Recording, Student};
use recital_common::{reconcile, week};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// One class card: a distinct class tag and its recording count.
#[derive(Debug, Serialize)]
pub struct ClassSummary {
    pub class: String,
    pub recordings: usize,
}

/// GET /api/classes
///
/// Distinct class tags in first-seen listing order, with recording counts.
/// Unattributable recordings show up under the `Unknown Class` tag rather
/// than being dropped.
pub async fn list_classes(State(state): State<AppState>) -> ApiResult<Json<Vec<ClassSummary>>> {
    let recordings = super::live_catalog(&state).await?;

    let mut summaries: Vec<ClassSummary> = Vec::new();
    for recording in &recordings {
        match summaries.iter().position(|s| s.class == recording.class) {
            Some(idx) => summaries[idx].recordings += 1,
            None => summaries.push(ClassSummary {
                class: recording.class.clone(),
                recordings: 1,
            }),
        }
    }

    Ok(Json(summaries))
}

/// Query parameters for the submissions view
#[derive(Debug, Deserialize)]
pub struct SubmissionsQuery {
    /// Week-start key (`YYYY-MM-DD`, Sunday-aligned); omit for all weeks
    pub week: Option<String>,
}

/// GET /api/classes/:class/submissions response
#[derive(Debug, Serialize)]
pub struct SubmissionsResponse {
    pub class: String,
    pub week: Option<String>,
    /// Week keys present across all recordings, most recent first
    pub available_weeks: Vec<String>,
    pub finished: Vec<Recording>,
    pub unfinished: Vec<Student>,
}

/// GET /api/classes/:class/submissions?week=YYYY-MM-DD
///
/// The teacher view: recordings of one class (optionally one week) next to
/// the roster students still missing. The roster comes from the
/// precedence-ordered fallback lookup, so a class tag with no roster entry
/// of its own reconciles against the full roster.
pub async fn class_submissions(
    State(state): State<AppState>,
    Path(class): Path<String>,
    Query(query): Query<SubmissionsQuery>,
) -> ApiResult<Json<SubmissionsResponse>> {
    if let Some(week) = &query.week {
        if NaiveDate::parse_from_str(week, "%Y-%m-%d").is_err() {
            return Err(ApiError::BadRequest(format!(
                "Invalid week key {} (expected YYYY-MM-DD)",
                week
            )));
        }
    }

    let recordings = super::live_catalog(&state).await?;

    let buckets = week::bucket(&recordings);
    let available_weeks = week::sorted_week_keys(&buckets);

    let roster = state.roster.students_with_fallback(&class);
    let partition = reconcile::reconcile(&class, query.week.as_deref(), &roster, &recordings);

    Ok(Json(SubmissionsResponse {
        class,
        week: query.week,
        available_weeks,
        finished: partition.finished,
        unfinished: partition.unfinished,
    }))
}

/// Build class browsing routes
pub fn classes_routes() -> Router<AppState> {
    Router::new()
        .route("/api/classes", get(list_classes))
        .route("/api/classes/:class/submissions", get(class_submissions))
}
