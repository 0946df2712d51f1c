//! HTTP API handlers for recital-svc

pub mod classes;
pub mod health;
pub mod recordings;
pub mod roster;
pub mod submit;

pub use classes::classes_routes;
pub use health::health_routes;
pub use recordings::recordings_routes;
pub use roster::roster_routes;
pub use submit::submit_routes;

use recital_common::model::Recording;
use recital_common::Result;

use crate::{catalog, AppState};

/// Fetch the live recording catalog: one store listing, parsed.
///
/// Recomputed per request; nothing is cached between calls.
pub(crate) async fn live_catalog(state: &AppState) -> Result<Vec<Recording>> {
    let entries = state.store.list(&state.settings.recordings_dir).await?;
    Ok(catalog::parse(&entries, &state.settings.public_url))
}
