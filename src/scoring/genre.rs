//! Flat-list aggregation for the genre-only flow.

use crate::mood::GenreMoodVector;
use crate::types::GenreCard;

/// Fractional weight for each genre, first pick to fourth pick
pub const GENRE_WEIGHTS: [f64; 4] = [0.5, 0.3, 0.15, 0.05];

/// Weighted sum of up to four genre cards in pick order.
///
/// Unlike [`super::aggregate_profile`] the result is not normalized; with
/// fewer than four picks the unused weight is simply missing. Cards past the
/// fourth are ignored.
pub fn genre_profile(genres: &[GenreCard]) -> GenreMoodVector {
    GenreMoodVector::from_fn(|dimension| {
        genres
            .iter()
            .zip(GENRE_WEIGHTS)
            .map(|(genre, weight)| genre.mood_score.get(dimension) * weight)
            .sum()
    })
}
