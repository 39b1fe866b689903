//! Quiz flow: building category answers and moving through the stages.
//!
//! This is the gate in front of the aggregator. Categories only reach
//! [`QuizProgress`] once their completion rule holds, so the scoring code
//! never sees a half-answered category.

mod ledger;

pub use ledger::{PointsLedger, PointsTransaction, TransactionKind};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, CategoryKind, QuestionCategory};
use crate::scoring::{Rank, MAX_RANK};
use crate::types::{CategorySelection, RankedSelection, ScoredOption};

/// Errors raised by the quiz flow
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Category {category} needs {rule} picks, got {got}")]
    Incomplete {
        category: String,
        rule: CompletionRule,
        got: usize,
    },

    #[error("Option already picked: {0}")]
    AlreadyPicked(String),

    #[error("Category {category} allows at most {max} picks")]
    TooManyPicks { category: String, max: usize },

    #[error("Category {category} belongs to stage {category_stage}, current stage is {current}")]
    WrongStage {
        category: String,
        category_stage: Stage,
        current: Stage,
    },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown option {option} in category {category}")]
    UnknownOption { category: String, option: String },

    #[error("Category already answered: {0}")]
    AlreadyAnswered(String),

    #[error("Quiz already completed")]
    AlreadyCompleted,

    #[error("Quiz not completed yet (current stage {0})")]
    NotCompleted(Stage),
}

/// How many picks a category answer must contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "count")]
pub enum CompletionRule {
    /// Exactly this many ranked picks
    Exactly(usize),
    /// At least this many picks, up to the number of rank slots
    AtLeast(usize),
}

impl CompletionRule {
    pub fn min_picks(&self) -> usize {
        match *self {
            CompletionRule::Exactly(n) | CompletionRule::AtLeast(n) => n,
        }
    }

    pub fn max_picks(&self) -> usize {
        match *self {
            CompletionRule::Exactly(n) => n,
            CompletionRule::AtLeast(_) => usize::from(MAX_RANK),
        }
    }

    pub fn is_satisfied(&self, picks: usize) -> bool {
        (self.min_picks()..=self.max_picks()).contains(&picks)
    }
}

impl std::fmt::Display for CompletionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionRule::Exactly(n) => write!(f, "exactly {n}"),
            CompletionRule::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Quiz stage, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    /// Visual mood cards
    #[default]
    MoodCards,
    /// Content deep-dive categories
    Content,
    /// Aesthetic picks
    Aesthetic,
    /// All stages answered
    Completed,
}

impl Stage {
    pub fn number(&self) -> u8 {
        match self {
            Stage::MoodCards => 1,
            Stage::Content => 2,
            Stage::Aesthetic => 3,
            Stage::Completed => 4,
        }
    }

    pub fn next(&self) -> Stage {
        match self {
            Stage::MoodCards => Stage::Content,
            Stage::Content => Stage::Aesthetic,
            Stage::Aesthetic | Stage::Completed => Stage::Completed,
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Stage::MoodCards),
            2 => Ok(Stage::Content),
            3 => Ok(Stage::Aesthetic),
            4 => Ok(Stage::Completed),
            other => Err(format!("unknown stage {other}")),
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A category answer being built pick by pick
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    category_id: String,
    title: String,
    icon: Option<String>,
    rule: CompletionRule,
    picks: Vec<ScoredOption>,
}

impl CategoryDraft {
    /// Start an empty answer for a catalog category
    pub fn for_category(category: &QuestionCategory) -> Self {
        Self {
            category_id: category.id.clone(),
            title: category.title.clone(),
            icon: category.icon.clone(),
            rule: category.kind.completion_rule(),
            picks: Vec::new(),
        }
    }

    /// Add the next pick and return the rank it received
    pub fn pick(&mut self, option: ScoredOption) -> Result<Rank, QuizError> {
        if self.picks.iter().any(|p| p.id == option.id) {
            return Err(QuizError::AlreadyPicked(option.id));
        }

        let rank = Rank::from_index(self.picks.len())
            .filter(|r| usize::from(r.order()) <= self.rule.max_picks())
            .ok_or_else(|| QuizError::TooManyPicks {
                category: self.category_id.clone(),
                max: self.rule.max_picks(),
            })?;

        self.picks.push(option);
        Ok(rank)
    }

    /// Remove a pick; later picks move up one rank
    pub fn unpick(&mut self, option_id: &str) -> bool {
        let before = self.picks.len();
        self.picks.retain(|p| p.id != option_id);
        self.picks.len() != before
    }

    /// True once the completion rule holds
    pub fn is_complete(&self) -> bool {
        self.rule.is_satisfied(self.picks.len())
    }

    /// Turn the picks into a ranked, weighted category answer
    pub fn finalize(self) -> Result<CategorySelection, QuizError> {
        if !self.is_complete() {
            return Err(QuizError::Incomplete {
                category: self.category_id,
                rule: self.rule,
                got: self.picks.len(),
            });
        }

        let mut selections = Vec::with_capacity(self.picks.len());
        let mut rank = Some(Rank::FIRST);
        for option in self.picks {
            // pick() caps the list at MAX_RANK, so a rank is always available
            let Some(current) = rank else { break };
            selections.push(RankedSelection::new(option, current));
            rank = current.next();
        }

        let mut selection = CategorySelection::new(self.category_id, self.title).with_selections(selections);
        selection.icon = self.icon;
        Ok(selection)
    }
}

/// Result of submitting a category answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum StageOutcome {
    /// Answer stored, the stage still has unanswered categories
    Recorded { stage: Stage },
    /// Answer stored and the stage is finished
    StageCompleted { stage: Stage, next: Stage },
    /// The last stage is finished
    QuizCompleted,
}

/// Persisted quiz progress for one session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizProgress {
    pub current_stage: Stage,
    #[serde(default)]
    pub mood_cards: Option<CategorySelection>,
    #[serde(default)]
    pub content: Vec<CategorySelection>,
    #[serde(default)]
    pub aesthetic: Option<CategorySelection>,
}

impl QuizProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self) -> bool {
        self.current_stage == Stage::Completed
    }

    /// Answer a catalog category with option ids in pick order
    pub fn submit(
        &mut self,
        catalog: &Catalog,
        category_id: &str,
        option_ids: &[String],
    ) -> Result<StageOutcome, QuizError> {
        if self.is_completed() {
            return Err(QuizError::AlreadyCompleted);
        }

        let category = catalog
            .category(category_id)
            .ok_or_else(|| QuizError::UnknownCategory(category_id.to_string()))?;

        let category_stage = category.kind.stage();
        if category_stage != self.current_stage {
            return Err(QuizError::WrongStage {
                category: category.id.clone(),
                category_stage,
                current: self.current_stage,
            });
        }

        if self.content.iter().any(|c| c.category_id == category.id) {
            return Err(QuizError::AlreadyAnswered(category.id.clone()));
        }

        let mut draft = CategoryDraft::for_category(category);
        for option_id in option_ids {
            let option = category.option(option_id).ok_or_else(|| QuizError::UnknownOption {
                category: category.id.clone(),
                option: option_id.clone(),
            })?;
            draft.pick(option.clone())?;
        }
        let selection = draft.finalize()?;

        let stage_done = match category.kind {
            CategoryKind::MoodCards => {
                self.mood_cards = Some(selection);
                true
            }
            CategoryKind::Content => {
                self.content.push(selection);
                let required = catalog.categories_of(CategoryKind::Content).count();
                self.content.len() >= required
            }
            CategoryKind::Aesthetic => {
                self.aesthetic = Some(selection);
                true
            }
        };

        debug!(
            category = %category.id,
            stage = %self.current_stage,
            stage_done,
            "Category submitted"
        );

        if !stage_done {
            return Ok(StageOutcome::Recorded {
                stage: self.current_stage,
            });
        }

        let finished = self.current_stage;
        self.current_stage = finished.next();

        Ok(if self.is_completed() {
            StageOutcome::QuizCompleted
        } else {
            StageOutcome::StageCompleted {
                stage: finished,
                next: self.current_stage,
            }
        })
    }

    /// All stored answers in stage order, ready for aggregation
    pub fn categories(&self) -> Vec<CategorySelection> {
        self.mood_cards
            .iter()
            .chain(self.content.iter())
            .chain(self.aesthetic.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn complete(progress: &mut QuizProgress, catalog: &Catalog) {
        progress
            .submit(catalog, "night_mood", &ids(&["neon_city", "candle_room", "rooftop_party", "rainy_window"]))
            .unwrap();
        progress
            .submit(catalog, "music", &ids(&["music_edm", "music_jazz", "music_lofi", "music_indie"]))
            .unwrap();
        progress
            .submit(catalog, "movie", &ids(&["movie_sf", "movie_action", "movie_comedy", "movie_classic"]))
            .unwrap();
        progress
            .submit(catalog, "space", &ids(&["space_club", "space_bar", "space_beach", "space_studio"]))
            .unwrap();
        progress.submit(catalog, "night_activity", &ids(&["act_dance"])).unwrap();
    }

    #[test]
    fn test_completion_rule_bounds() {
        let exact = CompletionRule::Exactly(4);
        assert!(!exact.is_satisfied(3));
        assert!(exact.is_satisfied(4));
        assert!(!exact.is_satisfied(5));

        let at_least = CompletionRule::AtLeast(1);
        assert!(!at_least.is_satisfied(0));
        assert!(at_least.is_satisfied(1));
        assert!(at_least.is_satisfied(4));
        assert!(!at_least.is_satisfied(5));
    }

    #[test]
    fn test_draft_assigns_ranks_in_pick_order() {
        let catalog = catalog();
        let music = catalog.category("music").unwrap();
        let mut draft = CategoryDraft::for_category(music);

        for (i, id) in ["music_jazz", "music_edm", "music_lofi", "music_ballad"].iter().enumerate() {
            let rank = draft.pick(music.option(id).unwrap().clone()).unwrap();
            assert_eq!(usize::from(rank.order()), i + 1);
        }

        let selection = draft.finalize().unwrap();
        let weights: Vec<u32> = selection.selections.iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![50, 30, 15, 5]);
        assert_eq!(selection.selections[0].option.id, "music_jazz");
        assert_eq!(selection.icon.as_deref(), Some("🎧"));
    }

    #[test]
    fn test_draft_rejects_duplicates_and_overflow() {
        let catalog = catalog();
        let music = catalog.category("music").unwrap();
        let mut draft = CategoryDraft::for_category(music);

        draft.pick(music.options[0].clone()).unwrap();
        assert!(matches!(
            draft.pick(music.options[0].clone()),
            Err(QuizError::AlreadyPicked(_))
        ));

        for option in &music.options[1..4] {
            draft.pick(option.clone()).unwrap();
        }
        assert!(matches!(
            draft.pick(music.options[4].clone()),
            Err(QuizError::TooManyPicks { max: 4, .. })
        ));
    }

    #[test]
    fn test_unpick_reranks() {
        let catalog = catalog();
        let music = catalog.category("music").unwrap();
        let mut draft = CategoryDraft::for_category(music);
        for option in &music.options[..4] {
            draft.pick(option.clone()).unwrap();
        }

        assert!(draft.unpick(&music.options[0].id));
        assert!(!draft.unpick("nope"));
        assert!(!draft.is_complete());
        draft.pick(music.options[5].clone()).unwrap();

        let selection = draft.finalize().unwrap();
        assert_eq!(selection.selections[0].option.id, music.options[1].id);
        assert_eq!(selection.selections[0].weight, 50);
        assert_eq!(selection.selections[3].option.id, music.options[5].id);
    }

    #[test]
    fn test_incomplete_ranked_category_rejected() {
        let catalog = catalog();
        let mut progress = QuizProgress::new();
        let err = progress
            .submit(&catalog, "night_mood", &ids(&["neon_city", "candle_room"]))
            .unwrap_err();
        assert!(matches!(err, QuizError::Incomplete { got: 2, .. }));
        assert_eq!(progress.current_stage, Stage::MoodCards);
        assert!(progress.mood_cards.is_none());
    }

    #[test]
    fn test_aesthetic_needs_one_pick() {
        let catalog = catalog();
        let aesthetic = catalog.category("night_activity").unwrap();
        let draft = CategoryDraft::for_category(aesthetic);
        assert!(matches!(draft.finalize(), Err(QuizError::Incomplete { got: 0, .. })));
    }

    #[test]
    fn test_stage_order_enforced() {
        let catalog = catalog();
        let mut progress = QuizProgress::new();
        let err = progress
            .submit(&catalog, "music", &ids(&["music_edm", "music_jazz", "music_lofi", "music_indie"]))
            .unwrap_err();
        assert!(matches!(
            err,
            QuizError::WrongStage {
                category_stage: Stage::Content,
                current: Stage::MoodCards,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_ids() {
        let catalog = catalog();
        let mut progress = QuizProgress::new();
        assert!(matches!(
            progress.submit(&catalog, "nope", &[]),
            Err(QuizError::UnknownCategory(_))
        ));
        assert!(matches!(
            progress.submit(&catalog, "night_mood", &ids(&["music_edm"])),
            Err(QuizError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_full_flow() {
        let catalog = catalog();
        let mut progress = QuizProgress::new();

        let outcome = progress
            .submit(&catalog, "night_mood", &ids(&["neon_city", "candle_room", "rooftop_party", "rainy_window"]))
            .unwrap();
        assert_eq!(
            outcome,
            StageOutcome::StageCompleted {
                stage: Stage::MoodCards,
                next: Stage::Content
            }
        );

        let outcome = progress
            .submit(&catalog, "music", &ids(&["music_edm", "music_jazz", "music_lofi", "music_indie"]))
            .unwrap();
        assert_eq!(outcome, StageOutcome::Recorded { stage: Stage::Content });

        assert!(matches!(
            progress.submit(&catalog, "music", &ids(&["music_edm", "music_jazz", "music_lofi", "music_indie"])),
            Err(QuizError::AlreadyAnswered(_))
        ));

        progress
            .submit(&catalog, "movie", &ids(&["movie_sf", "movie_action", "movie_comedy", "movie_classic"]))
            .unwrap();
        let outcome = progress
            .submit(&catalog, "space", &ids(&["space_club", "space_bar", "space_beach", "space_studio"]))
            .unwrap();
        assert_eq!(
            outcome,
            StageOutcome::StageCompleted {
                stage: Stage::Content,
                next: Stage::Aesthetic
            }
        );

        let outcome = progress
            .submit(&catalog, "night_activity", &ids(&["act_walk", "act_stargaze"]))
            .unwrap();
        assert_eq!(outcome, StageOutcome::QuizCompleted);
        assert!(progress.is_completed());

        let categories = progress.categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].category_id, "night_mood");
        assert_eq!(categories[4].category_id, "night_activity");
        assert_eq!(categories[4].total_weight(), 80);
    }

    #[test]
    fn test_completed_quiz_rejects_submissions() {
        let catalog = catalog();
        let mut progress = QuizProgress::new();
        complete(&mut progress, &catalog);
        assert!(matches!(
            progress.submit(&catalog, "night_activity", &ids(&["act_game"])),
            Err(QuizError::AlreadyCompleted)
        ));
    }

    #[test]
    fn test_progress_json_layout() {
        let catalog = catalog();
        let mut progress = QuizProgress::new();
        complete(&mut progress, &catalog);

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["current_stage"], 4);
        assert_eq!(json["content"].as_array().map(Vec::len), Some(3));

        let decoded: QuizProgress = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, progress);
    }

    #[test]
    fn test_stage_numbers() {
        assert_eq!(Stage::default(), Stage::MoodCards);
        assert_eq!(Stage::try_from(3u8), Ok(Stage::Aesthetic));
        assert!(Stage::try_from(0u8).is_err());
        assert_eq!(Stage::Completed.next(), Stage::Completed);
    }
}
