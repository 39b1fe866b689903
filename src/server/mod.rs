//! HTTP server setup and routing.

mod extractors;
mod profile;
mod routes;
mod session;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::{AppConfig, StoreMode};
use crate::error::AppError;
use crate::store::{MemoryStore, StateRepository};

pub use routes::MsgPack;

/// Type alias for the shared state repository
pub type SharedStore = Arc<dyn StateRepository>;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Question and genre catalog
    pub catalog: Arc<Catalog>,
    /// Per-session progress and points
    pub store: SharedStore,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    /// Build state from configuration, loading the catalog and opening the
    /// configured store.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let catalog = Catalog::load(&config.quiz)?;
        let store = open_store(&config)?;

        info!(
            categories = catalog.categories().len(),
            genres = catalog.genres().len(),
            store = %config.store.mode,
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            store,
            started_at: Instant::now(),
        })
    }

    /// Create AppState with an explicit catalog and repository
    pub fn with_store(config: AppConfig, catalog: Catalog, store: SharedStore) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            store,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

fn open_store(config: &AppConfig) -> Result<SharedStore, AppError> {
    match config.store.mode {
        StoreMode::Memory => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "storage-file")]
        StoreMode::File => {
            let store = crate::store::FileStore::open(&config.store.path)?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-file"))]
        StoreMode::File => Err(AppError::Internal(
            "File store requested but the storage-file feature is disabled".to_string(),
        )),
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/config", get(routes::config))
        // Catalog and stateless scoring
        .route("/catalog", get(profile::catalog))
        .route("/weights", get(profile::weights))
        .route("/profile/compute", post(profile::compute_profile))
        .route("/profile/genre", post(profile::genre_profile))
        // Session quiz flow
        .route(
            "/sessions/:session_id/progress",
            get(session::get_progress).delete(session::clear_session),
        )
        .route("/sessions/:session_id/submit", post(session::submit_category))
        .route("/sessions/:session_id/result", get(session::get_result))
        .route("/sessions/:session_id/share", post(session::share_result))
        .route("/sessions/:session_id/points", get(session::get_points));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
