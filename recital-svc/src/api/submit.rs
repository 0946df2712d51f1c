//! Recording submission API
//!
//! POST /api/save: decode the browser's base64 payload, derive the
//! canonical filename, and store blob + metadata on the WebDAV backend.

use axum::{extract::State, routing::post, Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Local, Utc};
use recital_common::naming;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/save request
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Student name as selected in the roster dropdown
    pub name: String,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub classroom: Option<String>,
    /// Base64 audio payload, with or without a `data:...;base64,` prefix
    pub audio_data: String,
}

/// POST /api/save response
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub file_name: String,
    pub remote_path: String,
}

/// Structured metadata record written once per upload, plus to the legacy
/// shared `metadata.json` (which only ever holds the latest submission).
#[derive(Debug, Serialize)]
struct SubmissionRecord<'a> {
    name: &'a str,
    classroom: &'a str,
    student_id: Option<&'a str>,
    audio_file: &'a str,
    remote_path: &'a str,
    submitted_at: DateTime<Utc>,
}

/// POST /api/save
///
/// Stores the recording under the configured remote directory. A second
/// submission by the same student on the same day derives the same path
/// and overwrites the first; that is policy, not an error.
pub async fn save_recording(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Student name is required".to_string()));
    }

    // Payload arrives as a data URL from FileReader.readAsDataURL; accept
    // bare base64 too
    let encoded = request
        .audio_data
        .split_once(',')
        .map(|(_, data)| data)
        .unwrap_or(&request.audio_data);
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| ApiError::BadRequest(format!("Unparseable audio payload: {}", e)))?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("Empty audio payload".to_string()));
    }

    let classroom = request.classroom.clone().unwrap_or_default();
    // Local calendar day, so late-evening submissions stay on their day
    let stem = naming::upload_file_name(&classroom, &request.name, Local::now().date_naive());
    let file_name = format!("{}.webm", stem);
    let dir = state.settings.recordings_dir.trim_end_matches('/');
    let remote_path = format!("{}/{}", dir, file_name);

    state.store.put(&remote_path, bytes).await?;

    let record = SubmissionRecord {
        name: &request.name,
        classroom: &classroom,
        student_id: request.student_id.as_deref(),
        audio_file: &file_name,
        remote_path: &remote_path,
        submitted_at: Utc::now(),
    };
    let record_json = serde_json::to_vec_pretty(&record)
        .map_err(|e| ApiError::Internal(format!("Metadata encoding failed: {}", e)))?;

    // One structured record per upload, plus the legacy shared file
    state
        .store
        .put(&format!("{}/meta/{}.json", dir, stem), record_json.clone())
        .await?;
    state
        .store
        .put(&format!("{}/metadata.json", dir), record_json)
        .await?;

    tracing::info!(
        student = %request.name,
        classroom = %record.classroom,
        path = %remote_path,
        "Recording stored"
    );

    Ok(Json(SubmitResponse {
        success: true,
        file_name,
        remote_path,
    }))
}

/// Build submission routes
pub fn submit_routes() -> Router<AppState> {
    Router::new().route("/api/save", post(save_recording))
}
