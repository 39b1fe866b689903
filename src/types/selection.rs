//! Selection records produced while a user answers the quiz.

use serde::{Deserialize, Serialize};

use crate::mood::{GenreMoodVector, MoodVector};
use crate::scoring::Rank;

/// An option a user can pick: a mood card, a content choice or an aesthetic pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOption {
    /// Option identifier, unique within the catalog
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Canonical position of this option in the mood space
    pub mood_score: MoodVector,
}

/// One picked option with its rank and weight within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSelection {
    pub option: ScoredOption,
    /// 1-based pick order
    pub order: Rank,
    /// Percentage weight (0-100)
    pub weight: u32,
}

impl RankedSelection {
    /// Pair an option with its rank, deriving the weight from the rank
    pub fn new(option: ScoredOption, order: Rank) -> Self {
        Self {
            option,
            weight: order.weight(),
            order,
        }
    }
}

/// A user's complete answer for one question category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub category_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub selections: Vec<RankedSelection>,
}

impl CategorySelection {
    pub fn new(category_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            title: title.into(),
            icon: None,
            selections: Vec::new(),
        }
    }

    /// Builder method to set the selections
    pub fn with_selections(mut self, selections: Vec<RankedSelection>) -> Self {
        self.selections = selections;
        self
    }

    /// Sum of selection weights in percent
    pub fn total_weight(&self) -> u32 {
        self.selections.iter().map(|s| s.weight).sum()
    }
}

/// A genre card from the genre-only flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreCard {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub mood_score: GenreMoodVector,
}
