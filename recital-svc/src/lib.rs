//! recital-svc library - classroom recording service
//!
//! REST API over a WebDAV blob store: students submit recordings, teachers
//! browse them by class and week, reconciled against the roster.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use recital_common::config::Settings;
use recital_common::roster::Roster;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::store::BlobStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Blob store handle, injected so tests can substitute a double
    pub store: Arc<dyn BlobStore>,
    /// Roster table, loaded once at startup
    pub roster: Arc<Roster>,
    /// Resolved service settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn BlobStore>, roster: Arc<Roster>, settings: Arc<Settings>) -> Self {
        Self {
            store,
            roster,
            settings,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::recordings_routes())
        .merge(api::classes_routes())
        .merge(api::roster_routes())
        .merge(api::submit_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
