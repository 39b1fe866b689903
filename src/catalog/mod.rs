//! Static option catalogs.
//!
//! The catalog is parsed and validated once when loaded. After that every
//! lookup works on strictly typed records and never re-checks shape.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::QuizConfig;
use crate::quiz::{CompletionRule, Stage};
use crate::types::{GenreCard, ScoredOption};

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Errors raised while loading or validating a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate id in catalog: {0}")]
    DuplicateId(String),

    #[error("Category {category} needs at least {required} options, has {got}")]
    TooFewOptions {
        category: String,
        required: usize,
        got: usize,
    },

    #[error("Mood score out of range for {0}")]
    ScoreOutOfRange(String),

    #[error("Catalog must contain {expected} {kind} categories, found {got}")]
    CategoryCount {
        kind: CategoryKind,
        expected: &'static str,
        got: usize,
    },

    #[error("Catalog has no genres")]
    NoGenres,
}

/// Which quiz stage a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Visual mood cards, ranked
    MoodCards,
    /// Content deep-dive, ranked
    Content,
    /// Free multi-select aesthetic picks
    Aesthetic,
}

impl CategoryKind {
    /// Answer completeness rule for categories of this kind
    pub fn completion_rule(&self) -> CompletionRule {
        match self {
            CategoryKind::MoodCards | CategoryKind::Content => CompletionRule::Exactly(4),
            CategoryKind::Aesthetic => CompletionRule::AtLeast(1),
        }
    }

    /// Stage in which categories of this kind are answered
    pub fn stage(&self) -> Stage {
        match self {
            CategoryKind::MoodCards => Stage::MoodCards,
            CategoryKind::Content => Stage::Content,
            CategoryKind::Aesthetic => Stage::Aesthetic,
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKind::MoodCards => write!(f, "mood_cards"),
            CategoryKind::Content => write!(f, "content"),
            CategoryKind::Aesthetic => write!(f, "aesthetic"),
        }
    }
}

/// A question category with its option list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCategory {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub kind: CategoryKind,
    pub options: Vec<ScoredOption>,
}

impl QuestionCategory {
    pub fn option(&self, option_id: &str) -> Option<&ScoredOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Validated option catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<QuestionCategory>,
    genres: Vec<GenreCard>,
}

impl Catalog {
    /// The catalog embedded in the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON text
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Read catalog file");
        Self::from_json(&json)
    }

    /// Load the catalog named by the quiz config, or the builtin one
    pub fn load(config: &QuizConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin()?,
        };

        info!(
            categories = catalog.categories.len(),
            genres = catalog.genres.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut category_ids = HashSet::new();
        let mut option_ids = HashSet::new();

        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateId(category.id.clone()));
            }

            let required = category.kind.completion_rule().min_picks();
            if category.options.len() < required {
                return Err(CatalogError::TooFewOptions {
                    category: category.id.clone(),
                    required,
                    got: category.options.len(),
                });
            }

            for option in &category.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(CatalogError::DuplicateId(option.id.clone()));
                }
                if !option.mood_score.is_in_range() {
                    return Err(CatalogError::ScoreOutOfRange(option.id.clone()));
                }
            }
        }

        let count = |kind| self.categories_of(kind).count();
        for (kind, ok, expected) in [
            (CategoryKind::MoodCards, count(CategoryKind::MoodCards) == 1, "exactly one"),
            (CategoryKind::Content, count(CategoryKind::Content) >= 1, "at least one"),
            (CategoryKind::Aesthetic, count(CategoryKind::Aesthetic) == 1, "exactly one"),
        ] {
            if !ok {
                return Err(CatalogError::CategoryCount {
                    kind,
                    expected,
                    got: count(kind),
                });
            }
        }

        if self.genres.is_empty() {
            return Err(CatalogError::NoGenres);
        }

        let mut genre_ids = HashSet::new();
        for genre in &self.genres {
            if !genre_ids.insert(genre.id.as_str()) {
                return Err(CatalogError::DuplicateId(genre.id.clone()));
            }
            if !genre.mood_score.is_in_range() {
                return Err(CatalogError::ScoreOutOfRange(genre.id.clone()));
            }
        }

        Ok(())
    }

    /// All categories in catalog order
    pub fn categories(&self) -> &[QuestionCategory] {
        &self.categories
    }

    /// Categories of one kind, in catalog order
    pub fn categories_of(&self, kind: CategoryKind) -> impl Iterator<Item = &QuestionCategory> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Option<&QuestionCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// All genre cards
    pub fn genres(&self) -> &[GenreCard] {
        &self.genres
    }

    /// Look up a genre card by id
    pub fn genre(&self, id: &str) -> Option<&GenreCard> {
        self.genres.iter().find(|g| g.id == id)
    }
}
