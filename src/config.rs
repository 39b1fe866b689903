use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `MOODMATCH_` prefix.
/// For example: `MOODMATCH_SERVER__PORT=8097`, `MOODMATCH_STORE__MODE=file`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Quiz content and points configuration
    #[serde(default)]
    pub quiz: QuizConfig,

    /// State store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizConfig {
    /// JSON catalog to load instead of the embedded one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Points awarded for quiz actions
    #[serde(default)]
    pub points: PointsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    /// Points for finishing a stage
    #[serde(default = "default_stage_complete_points")]
    pub stage_complete: u32,

    /// Bonus for finishing the whole quiz
    #[serde(default = "default_quiz_complete_points")]
    pub quiz_complete: u32,

    /// Points for the first share of a result
    #[serde(default = "default_share_points")]
    pub share: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            stage_complete: default_stage_complete_points(),
            quiz_complete: default_quiz_complete_points(),
            share: default_share_points(),
        }
    }
}

fn default_stage_complete_points() -> u32 {
    10
}

fn default_quiz_complete_points() -> u32 {
    50
}

fn default_share_points() -> u32 {
    20
}

/// Where session state lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// redb database file
    File,
}

impl std::fmt::Display for StoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreMode::Memory => write!(f, "memory"),
            StoreMode::File => write!(f, "file"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub mode: StoreMode,

    /// Database file used in `file` mode
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::default(),
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/mood-match.redb")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8097
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `MOODMATCH_` and use
    /// double underscores for nested values:
    /// - `MOODMATCH_SERVER__PORT` -> server.port
    /// - `MOODMATCH_STORE__MODE` -> store.mode
    /// - `MOODMATCH_QUIZ__POINTS__SHARE` -> quiz.points.share
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MOODMATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
