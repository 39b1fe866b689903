//! HTTP route handlers for service metadata.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::config::StoreMode;
use crate::types::{
    ConfigResponse, HealthResponse, HealthStatus, QuizInfo, ServerInfo, StoreInfo,
};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `MessagePack` response wrapper
pub struct MsgPack<T>(pub T);

impl<T: serde::Serialize> IntoResponse for MsgPack<T> {
    fn into_response(self) -> Response {
        match rmp_serde::to_vec_named(&self.0) {
            Ok(bytes) => (
                StatusCode::OK,
                [("content-type", "application/msgpack")],
                bytes,
            )
                .into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize response: {e}"),
            )
                .into_response(),
        }
    }
}

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health(State(state): State<AppState>) -> MsgPack<HealthResponse> {
    let catalog_loaded = !state.catalog.categories().is_empty();

    let store_ready = match state.store.check() {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "State store check failed");
            false
        }
    };

    let status = if catalog_loaded && store_ready {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    MsgPack(HealthResponse {
        status,
        version: VERSION.to_string(),
        catalog_loaded,
        store_ready,
        uptime_s: state.uptime_seconds(),
    })
}

/// Configuration endpoint
///
/// GET /api/v1/config
pub async fn config(State(state): State<AppState>) -> MsgPack<ConfigResponse> {
    let config = &state.config;
    let points = &config.quiz.points;

    let path = match config.store.mode {
        StoreMode::File => Some(config.store.path.display().to_string()),
        StoreMode::Memory => None,
    };

    MsgPack(ConfigResponse {
        quiz: QuizInfo {
            custom_catalog: config.quiz.catalog_path.is_some(),
            stage_complete_points: points.stage_complete,
            quiz_complete_points: points.quiz_complete,
            share_points: points.share,
        },
        server: ServerInfo {
            host: config.server.host.clone(),
            port: config.server.port,
        },
        store: StoreInfo {
            mode: config.store.mode.to_string(),
            path,
        },
    })
}
