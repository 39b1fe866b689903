//! Description for the genre-only flow.
//!
//! Names the first two picked genres with their weights and adds a mood
//! phrase. Thresholds here are exclusive and deliberately separate from the
//! six-dimension trait buckets.

use serde::{Deserialize, Serialize};

use crate::mood::GenreMoodVector;
use crate::scoring::GENRE_WEIGHTS;
use crate::types::GenreCard;

/// Description produced from a genre pick list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDescription {
    pub summary: String,
    /// `"{name} {percent}%"` for each of the first two genres
    pub highlights: Vec<String>,
}

fn energy_phrase(energy: f64) -> &'static str {
    if energy > 70.0 {
        "에너지 넘치는"
    } else if energy > 40.0 {
        "리듬감 있는"
    } else {
        "잔잔한"
    }
}

fn intimacy_phrase(intimacy: f64) -> &'static str {
    if intimacy > 60.0 {
        "혼자만의 시간을 즐기는"
    } else if intimacy > 30.0 {
        "가까운 사람과 나누는"
    } else {
        "여럿이 함께 어울리는"
    }
}

fn percent(weight: f64) -> u32 {
    (weight * 100.0).round() as u32
}

/// Describe a genre selection given its computed profile
pub fn describe_genres(genres: &[GenreCard], profile: &GenreMoodVector) -> GenreDescription {
    let highlights: Vec<String> = genres
        .iter()
        .zip(GENRE_WEIGHTS)
        .take(2)
        .map(|(genre, weight)| format!("{} {}%", genre.name, percent(weight)))
        .collect();

    let summary = match genres {
        [] => "아직 고른 장르가 없어요. 좋아하는 장르를 골라 주세요.".to_string(),
        [first] => format!(
            "{}({}%) 하나에 마음을 준 당신은 {} 분위기에서 {} 타입이에요.",
            first.name,
            percent(GENRE_WEIGHTS[0]),
            energy_phrase(profile.energy),
            intimacy_phrase(profile.intimacy),
        ),
        [first, second, ..] => format!(
            "{}({}%), {}({}%) 중심의 취향으로 {} 분위기에서 {} 타입이에요.",
            first.name,
            percent(GENRE_WEIGHTS[0]),
            second.name,
            percent(GENRE_WEIGHTS[1]),
            energy_phrase(profile.energy),
            intimacy_phrase(profile.intimacy),
        ),
    };

    GenreDescription {
        summary,
        highlights,
    }
}
