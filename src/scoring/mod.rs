//! Mood scoring.
//!
//! Rank weighting and the two aggregation paths: the category-normalized
//! six-dimensional profile used by the full quiz, and the flat four-dimensional
//! genre profile used by the genre-only flow.

mod aggregate;
mod genre;
mod weights;

pub use aggregate::aggregate_profile;
pub use genre::{genre_profile, GENRE_WEIGHTS};
pub use weights::{weight_for_index, Rank, MAX_RANK, RANK_WEIGHTS};
