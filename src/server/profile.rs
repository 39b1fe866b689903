//! Catalog and stateless profile endpoints.

use axum::extract::State;
use std::collections::HashSet;
use tracing::debug;

use crate::catalog::Catalog;
use crate::describe::{describe_genres, describe_profile};
use crate::error::AppError;
use crate::scoring::{aggregate_profile, genre_profile as compute_genre_profile, Rank, MAX_RANK};
use crate::share::RadarChart;
use crate::types::{
    CategorySelection, ComputeProfileRequest, GenreCard, GenreProfileRequest,
    GenreProfileResponse, ProfileResponse, RankWeight, WeightsResponse,
};

use super::extractors::Payload;
use super::routes::MsgPack;
use super::AppState;

/// Full question and genre catalog
///
/// GET /api/v1/catalog
pub async fn catalog(State(state): State<AppState>) -> MsgPack<Catalog> {
    MsgPack(state.catalog.as_ref().clone())
}

/// Rank weights in pick order
///
/// GET /api/v1/weights
pub async fn weights() -> MsgPack<WeightsResponse> {
    let weights = std::iter::successors(Some(Rank::FIRST), |r| r.next())
        .map(|rank| RankWeight {
            order: rank.order(),
            weight: rank.weight(),
        })
        .collect();

    MsgPack(WeightsResponse { weights })
}

/// Largest allowed selection weight, in percent
const MAX_WEIGHT: u32 = 100;

/// Reject client-built categories the aggregator must never see
fn check_category(category: &CategorySelection) -> Result<(), AppError> {
    if category.selections.len() > usize::from(MAX_RANK) {
        return Err(AppError::BadRequest(format!(
            "Category {} has {} selections, at most {MAX_RANK} allowed",
            category.category_id,
            category.selections.len()
        )));
    }

    let mut orders = HashSet::new();
    for selection in &category.selections {
        if !orders.insert(selection.order.order()) {
            return Err(AppError::BadRequest(format!(
                "Category {} repeats order {}",
                category.category_id,
                selection.order.order()
            )));
        }
        if selection.weight > MAX_WEIGHT {
            return Err(AppError::BadRequest(format!(
                "Selection {} in category {} has weight {}, at most {MAX_WEIGHT} allowed",
                selection.option.id, category.category_id, selection.weight
            )));
        }
    }

    Ok(())
}

/// Aggregate finished category answers into a profile
///
/// POST /api/v1/profile/compute
pub async fn compute_profile(
    Payload(req): Payload<ComputeProfileRequest>,
) -> Result<MsgPack<ProfileResponse>, AppError> {
    for category in &req.categories {
        check_category(category)?;
    }

    let profile = aggregate_profile(&req.categories);
    let description = describe_profile(&profile, Some(req.categories.as_slice()));

    debug!(
        categories = req.categories.len(),
        primary = ?description.primary_dimensions,
        "Profile computed"
    );

    Ok(MsgPack(ProfileResponse {
        chart: RadarChart::from_profile(&profile),
        profile,
        description,
    }))
}

/// Genre-only profile from up to four genre ids in pick order
///
/// POST /api/v1/profile/genre
pub async fn genre_profile(
    State(state): State<AppState>,
    Payload(req): Payload<GenreProfileRequest>,
) -> Result<MsgPack<GenreProfileResponse>, AppError> {
    if req.genre_ids.is_empty() {
        return Err(AppError::BadRequest("No genres provided".to_string()));
    }
    if req.genre_ids.len() > usize::from(MAX_RANK) {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_RANK} genres allowed, got {}",
            req.genre_ids.len()
        )));
    }

    let mut seen = HashSet::new();
    let mut genres: Vec<GenreCard> = Vec::with_capacity(req.genre_ids.len());
    for id in &req.genre_ids {
        if !seen.insert(id.as_str()) {
            return Err(AppError::BadRequest(format!("Genre picked twice: {id}")));
        }
        let genre = state
            .catalog
            .genre(id)
            .ok_or_else(|| AppError::NotFound(format!("Genre not found: {id}")))?;
        genres.push(genre.clone());
    }

    let profile = compute_genre_profile(&genres);
    let description = describe_genres(&genres, &profile);

    Ok(MsgPack(GenreProfileResponse {
        profile,
        description,
        genres,
    }))
}
