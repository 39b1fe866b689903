//! Category-normalized mood aggregation.

use crate::mood::MoodVector;
use crate::types::CategorySelection;

/// Combine every answered category into one mood profile.
///
/// Each selection contributes `mood_score * weight / 100`; the per-dimension
/// sums are then divided by the number of categories, not by the total weight
/// contributed. An empty input yields [`MoodVector::ZERO`].
pub fn aggregate_profile(categories: &[CategorySelection]) -> MoodVector {
    if categories.is_empty() {
        return MoodVector::ZERO;
    }

    let category_count = categories.len() as f64;

    MoodVector::from_fn(|dimension| {
        let raw_sum: f64 = categories
            .iter()
            .flat_map(|category| category.selections.iter())
            .map(|selection| {
                selection.option.mood_score.get(dimension) * (f64::from(selection.weight) / 100.0)
            })
            .sum();

        raw_sum / category_count
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodDimension;
    use crate::scoring::Rank;
    use crate::types::{RankedSelection, ScoredOption};

    const EPSILON: f64 = 1e-9;

    fn option(id: &str, score: MoodVector) -> ScoredOption {
        ScoredOption {
            id: id.to_string(),
            emoji: None,
            title: id.to_string(),
            description: None,
            tags: Vec::new(),
            mood_score: score,
        }
    }

    fn full_weight_category(id: &str, score: MoodVector) -> CategorySelection {
        CategorySelection::new(id, id).with_selections(vec![RankedSelection {
            option: option(id, score),
            order: Rank::FIRST,
            weight: 100,
        }])
    }

    fn ranked_category(id: &str, scores: [MoodVector; 4]) -> CategorySelection {
        let selections = scores
            .into_iter()
            .enumerate()
            .map(|(i, s)| RankedSelection::new(option(&format!("{id}-{i}"), s), Rank::from_index(i).unwrap()))
            .collect();
        CategorySelection::new(id, id).with_selections(selections)
    }

    fn assert_close(actual: &MoodVector, expected: &MoodVector) {
        for d in MoodDimension::ALL {
            assert!(
                (actual.get(d) - expected.get(d)).abs() < EPSILON,
                "{d}: expected {}, got {}",
                expected.get(d),
                actual.get(d)
            );
        }
    }

    fn vector(values: [f64; 6]) -> MoodVector {
        MoodVector {
            energy: values[0],
            intimacy: values[1],
            creativity: values[2],
            nostalgia: values[3],
            depth: values[4],
            openness: values[5],
        }
    }

    #[test]
    fn test_single_full_weight_selection_is_identity() {
        let score = vector([80.0, 20.0, 40.0, 10.0, 0.0, 0.0]);
        let profile = aggregate_profile(&[full_weight_category("a", score)]);
        assert_close(&profile, &score);
    }

    #[test]
    fn test_two_categories_are_averaged() {
        let a = vector([100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let b = vector([0.0, 100.0, 0.0, 0.0, 0.0, 0.0]);
        let profile = aggregate_profile(&[full_weight_category("a", a), full_weight_category("b", b)]);
        assert_close(&profile, &vector([50.0, 50.0, 0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_empty_input_is_zero() {
        let profile = aggregate_profile(&[]);
        assert_eq!(profile, MoodVector::ZERO);
        assert!(profile.entries().all(|(_, v)| v.is_finite()));
    }

    #[test]
    fn test_divides_by_category_count_not_weight() {
        // One category with a single 50% pick still counts as a whole category
        let mut category = full_weight_category("a", vector([100.0; 6]));
        category.selections[0].weight = 50;
        let profile = aggregate_profile(&[category]);
        assert_close(&profile, &vector([50.0; 6]));
    }

    #[test]
    fn test_three_ranked_categories() {
        let c1 = ranked_category(
            "c1",
            [
                vector([90.0, 10.0, 50.0, 20.0, 30.0, 70.0]),
                vector([60.0, 40.0, 80.0, 10.0, 20.0, 50.0]),
                vector([20.0, 80.0, 30.0, 90.0, 60.0, 10.0]),
                vector([0.0, 100.0, 0.0, 100.0, 100.0, 0.0]),
            ],
        );
        let c2 = ranked_category(
            "c2",
            [
                vector([10.0, 20.0, 30.0, 40.0, 50.0, 60.0]),
                vector([60.0, 50.0, 40.0, 30.0, 20.0, 10.0]),
                vector([100.0, 100.0, 100.0, 100.0, 100.0, 100.0]),
                vector([0.0; 6]),
            ],
        );
        let c3 = ranked_category(
            "c3",
            [
                vector([75.0, 25.0, 75.0, 25.0, 75.0, 25.0]),
                vector([40.0, 60.0, 40.0, 60.0, 40.0, 60.0]),
                vector([5.0, 15.0, 25.0, 35.0, 45.0, 55.0]),
                vector([100.0, 0.0, 100.0, 0.0, 100.0, 0.0]),
            ],
        );

        let weights = [0.5, 0.3, 0.15, 0.05];
        let categories = [c1, c2, c3];
        let expected = MoodVector::from_fn(|d| {
            let mut sum = 0.0;
            for category in &categories {
                for (i, sel) in category.selections.iter().enumerate() {
                    sum += sel.option.mood_score.get(d) * weights[i];
                }
            }
            sum / 3.0
        });

        // energy by hand: c1 = 45 + 18 + 3 + 0 = 66, c2 = 5 + 18 + 15 + 0 = 38,
        // c3 = 37.5 + 12 + 0.75 + 5 = 55.25 -> 159.25 / 3
        assert!((expected.energy - 159.25 / 3.0).abs() < EPSILON);

        let profile = aggregate_profile(&categories);
        assert_close(&profile, &expected);
    }

    #[test]
    fn test_no_clamping() {
        let mut category = full_weight_category("a", vector([150.0, -20.0, 0.0, 0.0, 0.0, 0.0]));
        category.selections[0].weight = 100;
        let profile = aggregate_profile(&[category]);
        assert!((profile.energy - 150.0).abs() < EPSILON);
        assert!((profile.intimacy + 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_category_order_does_not_matter() {
        let a = full_weight_category("a", vector([10.0, 20.0, 30.0, 40.0, 50.0, 60.0]));
        let b = full_weight_category("b", vector([60.0, 50.0, 40.0, 30.0, 20.0, 10.0]));
        let ab = aggregate_profile(&[a.clone(), b.clone()]);
        let ba = aggregate_profile(&[b, a]);
        assert_close(&ab, &ba);
    }
}
