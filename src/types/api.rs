//! Request/response types for quiz, profile and session operations.

use serde::{Deserialize, Serialize};

use crate::describe::{GenreDescription, MoodDescription};
use crate::mood::{GenreMoodVector, MoodVector};
use crate::quiz::{PointsTransaction, QuizProgress, StageOutcome};
use crate::share::{RadarChart, ShareCard};

use super::selection::{CategorySelection, GenreCard};

/// Weight for one rank slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankWeight {
    /// 1-based pick order
    pub order: u8,
    /// Percentage weight
    pub weight: u32,
}

/// Response listing the rank weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsResponse {
    pub weights: Vec<RankWeight>,
}

/// Request to compute a profile from finished category answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeProfileRequest {
    #[serde(default)]
    pub categories: Vec<CategorySelection>,
}

/// Computed profile with its description and chart data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: MoodVector,
    pub description: MoodDescription,
    pub chart: RadarChart,
}

/// Request to compute a genre-only profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreProfileRequest {
    /// Genre ids in pick order
    pub genre_ids: Vec<String>,
}

/// Genre-only profile and description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreProfileResponse {
    pub profile: GenreMoodVector,
    pub description: GenreDescription,
    /// Resolved genre cards, in pick order
    pub genres: Vec<GenreCard>,
}

/// Request to answer one category of a session's quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCategoryRequest {
    pub category_id: String,
    /// Option ids in pick order
    #[serde(default)]
    pub option_ids: Vec<String>,
}

/// Result of answering a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCategoryResponse {
    pub outcome: StageOutcome,
    pub progress: QuizProgress,
    /// Points earned by this submission
    pub points_awarded: u32,
    /// Ledger balance after the submission
    pub balance: i64,
}

/// Stored progress for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub session_id: String,
    pub progress: QuizProgress,
}

/// Response from clearing a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearSessionResponse {
    pub cleared: bool,
    pub message: String,
}

/// Shareable result for a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub card: ShareCard,
    /// Plain-text fallback
    pub text: String,
    pub points_awarded: u32,
}

/// Points ledger for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsResponse {
    pub balance: i64,
    pub transactions: Vec<PointsTransaction>,
}
