//! Shared types for the mood match API.
//!
//! These types are used across the application for request/response handling
//! and internal data representation.

pub mod api;
pub mod selection;

use serde::{Deserialize, Serialize};

pub use api::*;
pub use selection::{CategorySelection, GenreCard, RankedSelection, ScoredOption};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(default)]
    pub catalog_loaded: bool,
    #[serde(default)]
    pub store_ready: bool,
    #[serde(default)]
    pub uptime_s: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Configuration response (subset of config safe to expose)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub quiz: QuizInfo,
    pub server: ServerInfo,
    pub store: StoreInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizInfo {
    pub custom_catalog: bool,
    pub stage_complete_points: u32,
    pub quiz_complete_points: u32,
    pub share_points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub mode: String,
    pub path: Option<String>,
}
