//! Recording listing API
//!
//! GET /api/recordings (live WebDAV listing) and
//! GET /api/recordings/cached (local cache file).

use axum::{extract::State, routing::get, Json, Router};
use recital_common::model::Recording;

use crate::error::{ApiError, ApiResult};
use crate::{cache, AppState};

/// GET /api/recordings
///
/// Live listing of the remote recordings directory. An absent directory is
/// 404 and an unreachable store is 502; an empty array always means
/// "directory listed fine, zero recordings".
pub async fn list_recordings(State(state): State<AppState>) -> ApiResult<Json<Vec<Recording>>> {
    let dir = &state.settings.recordings_dir;
    if !state.store.exists(dir).await? {
        return Err(ApiError::NotFound(format!(
            "Recordings directory {} not found",
            dir
        )));
    }

    let recordings = super::live_catalog(&state).await?;
    tracing::debug!(count = recordings.len(), "Listed recordings");
    Ok(Json(recordings))
}

/// GET /api/recordings/cached
///
/// The local cache file's recording list, as an alternative data source to
/// the live listing.
pub async fn cached_recordings(State(state): State<AppState>) -> ApiResult<Json<Vec<Recording>>> {
    let recordings = cache::read(&state.settings.cache_path)?;
    Ok(Json(recordings))
}

/// Build recording listing routes
pub fn recordings_routes() -> Router<AppState> {
    Router::new()
        .route("/api/recordings", get(list_recordings))
        .route("/api/recordings/cached", get(cached_recordings))
}
