//! Roster API
//!
//! GET /api/classrooms/:id/students and GET /api/students.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use recital_common::model::Student;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// One roster entry with its submission status.
#[derive(Debug, Serialize)]
pub struct StudentWithStatus {
    pub id: String,
    pub name: String,
    pub has_recording: bool,
}

/// GET /api/classrooms/:id/students response
#[derive(Debug, Serialize)]
pub struct StudentsResponse {
    pub students: Vec<StudentWithStatus>,
}

/// GET /api/classrooms/:id/students
///
/// The classroom's roster with a per-student submission flag. The roster
/// is the primary payload: when the store listing fails the endpoint still
/// answers, with every flag false and a warning logged, instead of turning
/// a roster query into a 502.
pub async fn classroom_students(
    State(state): State<AppState>,
    Path(classroom_id): Path<String>,
) -> ApiResult<Json<StudentsResponse>> {
    let students = state
        .roster
        .students_for(&classroom_id)
        .ok_or_else(|| ApiError::NotFound(format!("Classroom {} not found", classroom_id)))?;

    let recordings = match super::live_catalog(&state).await {
        Ok(recordings) => recordings,
        Err(e) => {
            tracing::warn!(error = %e, "Recording status unavailable, serving roster without it");
            Vec::new()
        }
    };

    let students = students
        .iter()
        .map(|student| StudentWithStatus {
            id: student.id.clone(),
            name: student.name.clone(),
            has_recording: recordings
                .iter()
                .filter(|r| r.class == classroom_id)
                .any(|r| r.student_name() == student.name),
        })
        .collect();

    Ok(Json(StudentsResponse { students }))
}

/// GET /api/students
///
/// Every student across all classrooms, flattened in roster file order.
pub async fn all_students(State(state): State<AppState>) -> Json<Vec<Student>> {
    Json(state.roster.all_students())
}

/// Build roster routes
pub fn roster_routes() -> Router<AppState> {
    Router::new()
        .route("/api/classrooms/:id/students", get(classroom_students))
        .route("/api/students", get(all_students))
}
