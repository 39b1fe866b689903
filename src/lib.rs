//! Mood Match
//!
//! Scoring core and HTTP service for a night-mood matching quiz. Ranked picks
//! are weighted 50/30/15/5, averaged per category into a six-dimension mood
//! profile and turned into a short Korean description.

pub mod catalog;
pub mod config;
pub mod describe;
pub mod error;
pub mod mood;
pub mod quiz;
pub mod scoring;
pub mod server;
pub mod share;
pub mod store;
pub mod types;

pub use catalog::Catalog;
pub use config::{AppConfig, StoreMode};
pub use describe::{describe_genres, describe_profile, GenreDescription, MoodDescription};
pub use error::{AppError, Result};
pub use mood::{GenreMoodVector, MoodDimension, MoodVector};
pub use scoring::{aggregate_profile, genre_profile, Rank};
