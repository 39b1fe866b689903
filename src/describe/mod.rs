//! Natural-language descriptions of mood profiles.
//!
//! Every dimension maps to one adjective through fixed threshold buckets.
//! Bucket lower bounds are inclusive and checked from highest to lowest.

mod genre;

pub use genre::{describe_genres, GenreDescription};

use serde::{Deserialize, Serialize};

use crate::mood::{MoodDimension, MoodVector};
use crate::types::CategorySelection;

/// Number of dimensions reported as primary
pub const PRIMARY_DIMENSION_COUNT: usize = 3;

const FALLBACK_TRAITS: [&str; 3] = ["독특한", "감성적인", "개성있는"];

/// A threshold bucket: values `>= min` get `adjective`
struct TraitBucket {
    min: f64,
    adjective: &'static str,
}

const fn bucket(min: f64, adjective: &'static str) -> TraitBucket {
    TraitBucket { min, adjective }
}

const ENERGY_BUCKETS: &[TraitBucket] = &[
    bucket(75.0, "역동적인"),
    bucket(50.0, "활기찬"),
    bucket(25.0, "차분한"),
    bucket(f64::NEG_INFINITY, "고요한"),
];

const INTIMACY_BUCKETS: &[TraitBucket] = &[
    bucket(75.0, "내밀한"),
    bucket(50.0, "친근한"),
    bucket(f64::NEG_INFINITY, "공적인"),
];

const CREATIVITY_BUCKETS: &[TraitBucket] = &[
    bucket(75.0, "독창적인"),
    bucket(50.0, "감각적인"),
    bucket(f64::NEG_INFINITY, "전통적인"),
];

const NOSTALGIA_BUCKETS: &[TraitBucket] = &[
    bucket(75.0, "향수어린"),
    bucket(50.0, "클래식한"),
    bucket(f64::NEG_INFINITY, "모던한"),
];

const DEPTH_BUCKETS: &[TraitBucket] = &[
    bucket(75.0, "진중한"),
    bucket(50.0, "사색적인"),
    bucket(f64::NEG_INFINITY, "경쾌한"),
];

const OPENNESS_BUCKETS: &[TraitBucket] = &[
    bucket(75.0, "탐험적인"),
    bucket(50.0, "호기심많은"),
    bucket(f64::NEG_INFINITY, "익숙함을선호하는"),
];

fn buckets_for(dimension: MoodDimension) -> &'static [TraitBucket] {
    match dimension {
        MoodDimension::Energy => ENERGY_BUCKETS,
        MoodDimension::Intimacy => INTIMACY_BUCKETS,
        MoodDimension::Creativity => CREATIVITY_BUCKETS,
        MoodDimension::Nostalgia => NOSTALGIA_BUCKETS,
        MoodDimension::Depth => DEPTH_BUCKETS,
        MoodDimension::Openness => OPENNESS_BUCKETS,
    }
}

/// Adjective for a single dimension value.
///
/// The last bucket of every table has no lower bound, so NaN is the only
/// value that falls through; it gets the lowest bucket as well.
pub fn trait_for(dimension: MoodDimension, value: f64) -> &'static str {
    let buckets = buckets_for(dimension);
    buckets
        .iter()
        .find(|b| value >= b.min)
        .or_else(|| buckets.last())
        .map_or(FALLBACK_TRAITS[0], |b| b.adjective)
}

/// Read-only summary of a mood profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodDescription {
    /// One templated sentence
    pub summary: String,
    /// One adjective per dimension, in dimension order
    pub traits: Vec<String>,
    /// Display labels of the three highest-scoring dimensions
    pub primary_dimensions: Vec<String>,
}

/// Dimensions sorted by value, highest first.
///
/// The sort is stable, so ties keep the fixed dimension order.
pub fn ranked_dimensions(profile: &MoodVector) -> Vec<(MoodDimension, f64)> {
    let mut ranked: Vec<(MoodDimension, f64)> = profile.entries().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// Describe a profile.
///
/// `selections` is accepted so callers can pass the originating answers
/// alongside the profile; the description depends on the profile alone.
pub fn describe_profile(profile: &MoodVector, _selections: Option<&[CategorySelection]>) -> MoodDescription {
    let traits: Vec<String> = profile
        .entries()
        .map(|(dimension, value)| trait_for(dimension, value).to_string())
        .collect();

    let primary_dimensions = ranked_dimensions(profile)
        .into_iter()
        .take(PRIMARY_DIMENSION_COUNT)
        .map(|(dimension, _)| dimension.label().to_string())
        .collect();

    let summary = summary_sentence(&traits);

    MoodDescription {
        summary,
        traits,
        primary_dimensions,
    }
}

/// Summary built from the energy, intimacy and creativity adjectives
fn summary_sentence(traits: &[String]) -> String {
    let pick = |i: usize| traits.get(i).map_or(FALLBACK_TRAITS[i], String::as_str);
    format!("당신은 {}, {}, {} 밤을 선호하시네요.", pick(0), pick(1), pick(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: f64) -> MoodVector {
        MoodVector::from_fn(|_| value)
    }

    #[test]
    fn test_energy_buckets() {
        assert_eq!(trait_for(MoodDimension::Energy, 100.0), "역동적인");
        assert_eq!(trait_for(MoodDimension::Energy, 75.0), "역동적인");
        assert_eq!(trait_for(MoodDimension::Energy, 74.99), "활기찬");
        assert_eq!(trait_for(MoodDimension::Energy, 50.0), "활기찬");
        assert_eq!(trait_for(MoodDimension::Energy, 49.99), "차분한");
        assert_eq!(trait_for(MoodDimension::Energy, 25.0), "차분한");
        assert_eq!(trait_for(MoodDimension::Energy, 24.99), "고요한");
        assert_eq!(trait_for(MoodDimension::Energy, -10.0), "고요한");
    }

    #[test]
    fn test_inclusive_bounds_for_every_dimension() {
        let expected = [
            (MoodDimension::Energy, "역동적인", "활기찬"),
            (MoodDimension::Intimacy, "내밀한", "친근한"),
            (MoodDimension::Creativity, "독창적인", "감각적인"),
            (MoodDimension::Nostalgia, "향수어린", "클래식한"),
            (MoodDimension::Depth, "진중한", "사색적인"),
            (MoodDimension::Openness, "탐험적인", "호기심많은"),
        ];
        for (dimension, high, mid) in expected {
            assert_eq!(trait_for(dimension, 75.0), high, "{dimension} at 75");
            assert_eq!(trait_for(dimension, 50.0), mid, "{dimension} at 50");
        }
    }

    #[test]
    fn test_low_buckets() {
        assert_eq!(trait_for(MoodDimension::Intimacy, 49.0), "공적인");
        assert_eq!(trait_for(MoodDimension::Creativity, 0.0), "전통적인");
        assert_eq!(trait_for(MoodDimension::Nostalgia, 10.0), "모던한");
        assert_eq!(trait_for(MoodDimension::Depth, 30.0), "경쾌한");
        assert_eq!(trait_for(MoodDimension::Openness, 49.9), "익숙함을선호하는");
    }

    #[test]
    fn test_nan_gets_lowest_bucket() {
        assert_eq!(trait_for(MoodDimension::Energy, f64::NAN), "고요한");
    }

    #[test]
    fn test_traits_follow_dimension_order() {
        let profile = MoodVector {
            energy: 10.0,
            intimacy: 90.0,
            creativity: 60.0,
            nostalgia: 80.0,
            depth: 20.0,
            openness: 55.0,
        };
        let description = describe_profile(&profile, None);
        assert_eq!(
            description.traits,
            vec!["고요한", "내밀한", "감각적인", "향수어린", "경쾌한", "호기심많은"]
        );
    }

    #[test]
    fn test_summary_uses_first_three_traits() {
        let profile = MoodVector {
            energy: 80.0,
            intimacy: 60.0,
            creativity: 10.0,
            nostalgia: 100.0,
            depth: 100.0,
            openness: 100.0,
        };
        let description = describe_profile(&profile, None);
        assert_eq!(description.summary, "당신은 역동적인, 친근한, 전통적인 밤을 선호하시네요.");
    }

    #[test]
    fn test_summary_fallback() {
        assert_eq!(summary_sentence(&[]), "당신은 독특한, 감성적인, 개성있는 밤을 선호하시네요.");
        assert_eq!(
            summary_sentence(&["활기찬".to_string()]),
            "당신은 활기찬, 감성적인, 개성있는 밤을 선호하시네요."
        );
    }

    #[test]
    fn test_primary_dimensions_sorted_desc() {
        let profile = MoodVector {
            energy: 10.0,
            intimacy: 90.0,
            creativity: 60.0,
            nostalgia: 80.0,
            depth: 20.0,
            openness: 55.0,
        };
        let description = describe_profile(&profile, None);
        assert_eq!(description.primary_dimensions, vec!["친밀감", "향수", "창의성"]);
    }

    #[test]
    fn test_primary_dimensions_stable_ties() {
        let description = describe_profile(&uniform(40.0), None);
        assert_eq!(description.primary_dimensions, vec!["에너지", "친밀감", "창의성"]);

        let profile = MoodVector {
            depth: 70.0,
            openness: 70.0,
            nostalgia: 70.0,
            ..MoodVector::ZERO
        };
        let description = describe_profile(&profile, None);
        assert_eq!(description.primary_dimensions, vec!["향수", "깊이", "개방성"]);
    }

    #[test]
    fn test_primary_dimensions_shape() {
        let labels: Vec<&str> = MoodDimension::ALL.iter().map(|d| d.label()).collect();
        for value in [0.0, 33.0, 99.0] {
            let profile = MoodVector {
                creativity: value,
                ..uniform(50.0)
            };
            let description = describe_profile(&profile, None);
            assert_eq!(description.primary_dimensions.len(), PRIMARY_DIMENSION_COUNT);
            assert!(description
                .primary_dimensions
                .iter()
                .all(|l| labels.contains(&l.as_str())));
            let mut unique = description.primary_dimensions.clone();
            unique.dedup();
            assert_eq!(unique.len(), PRIMARY_DIMENSION_COUNT);
        }
    }

    #[test]
    fn test_describe_is_idempotent() {
        let profile = MoodVector {
            energy: 62.5,
            intimacy: 12.0,
            creativity: 75.0,
            nostalgia: 49.999,
            depth: 88.0,
            openness: 50.0,
        };
        let first = describe_profile(&profile, None);
        let second = describe_profile(&profile, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_selections_do_not_change_description() {
        let profile = uniform(60.0);
        let selections = vec![CategorySelection::new("music", "음악")];
        assert_eq!(
            describe_profile(&profile, Some(&selections)),
            describe_profile(&profile, None)
        );
    }
}
