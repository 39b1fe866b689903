//! Session quiz endpoints: submitting answers, results, sharing and points.

use axum::extract::{Path, State};
use tracing::info;

use crate::describe::describe_profile;
use crate::error::AppError;
use crate::quiz::{PointsLedger, QuizError, QuizProgress, Stage, StageOutcome};
use crate::scoring::aggregate_profile;
use crate::share::{RadarChart, ShareCard};
use crate::types::{
    ClearSessionResponse, PointsResponse, ProfileResponse, ProgressResponse, ShareResponse,
    SubmitCategoryRequest, SubmitCategoryResponse,
};

use super::extractors::Payload;
use super::routes::MsgPack;
use super::AppState;

const SHARE_ACTION: &str = "share";
const QUIZ_COMPLETE_ACTION: &str = "quiz_complete";

fn stage_action(stage: Stage) -> String {
    format!("stage_complete:{stage}")
}

/// Award points once per action; returns the points granted
fn award_once(ledger: &mut PointsLedger, action: &str, points: u32) -> u32 {
    if points == 0 || ledger.has_action(action) {
        return 0;
    }
    ledger.earn(action, points);
    points
}

fn ensure_completed(progress: &QuizProgress) -> Result<(), QuizError> {
    if progress.is_completed() {
        Ok(())
    } else {
        Err(QuizError::NotCompleted(progress.current_stage))
    }
}

/// Stored progress for a session; a new session starts at stage 1
///
/// GET /api/v1/sessions/:session_id/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<MsgPack<ProgressResponse>, AppError> {
    let progress = state.store.load_progress(&session_id)?.unwrap_or_default();
    Ok(MsgPack(ProgressResponse {
        session_id,
        progress,
    }))
}

/// Drop a session's progress and points
///
/// DELETE /api/v1/sessions/:session_id/progress
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<MsgPack<ClearSessionResponse>, AppError> {
    let existed = state.store.load_progress(&session_id)?.is_some();
    state.store.clear_progress(&session_id)?;
    state.store.clear_ledger(&session_id)?;

    info!(session_id = %session_id, existed, "Session cleared");

    let message = if existed {
        format!("Session {session_id} cleared")
    } else {
        format!("Session {session_id} had no stored progress")
    };

    Ok(MsgPack(ClearSessionResponse {
        cleared: existed,
        message,
    }))
}

/// Answer one category of the current stage
///
/// POST /api/v1/sessions/:session_id/submit
pub async fn submit_category(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Payload(req): Payload<SubmitCategoryRequest>,
) -> Result<MsgPack<SubmitCategoryResponse>, AppError> {
    let catalog = &state.catalog;
    let points = &state.config.quiz.points;

    // Answer and points land in one store update or not at all
    let response = state.store.update_session(
        &session_id,
        |progress, ledger| -> Result<SubmitCategoryResponse, AppError> {
            let outcome = progress.submit(catalog, &req.category_id, &req.option_ids)?;

            let points_awarded = match outcome {
                StageOutcome::Recorded { .. } => 0,
                StageOutcome::StageCompleted { stage, .. } => {
                    award_once(ledger, &stage_action(stage), points.stage_complete)
                }
                StageOutcome::QuizCompleted => {
                    award_once(ledger, &stage_action(Stage::Aesthetic), points.stage_complete)
                        + award_once(ledger, QUIZ_COMPLETE_ACTION, points.quiz_complete)
                }
            };

            Ok(SubmitCategoryResponse {
                outcome,
                progress: progress.clone(),
                points_awarded,
                balance: ledger.balance(),
            })
        },
    )?;

    info!(
        session_id = %session_id,
        category = %req.category_id,
        stage = %response.progress.current_stage,
        points_awarded = response.points_awarded,
        "Category answer recorded"
    );

    Ok(MsgPack(response))
}

/// Profile for a finished quiz
///
/// GET /api/v1/sessions/:session_id/result
pub async fn get_result(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<MsgPack<ProfileResponse>, AppError> {
    let progress = state.store.load_progress(&session_id)?.unwrap_or_default();
    ensure_completed(&progress)?;
    let categories = progress.categories();

    let profile = aggregate_profile(&categories);
    let description = describe_profile(&profile, Some(categories.as_slice()));

    Ok(MsgPack(ProfileResponse {
        chart: RadarChart::from_profile(&profile),
        profile,
        description,
    }))
}

/// Build the share card for a finished quiz; the first share earns points
///
/// POST /api/v1/sessions/:session_id/share
pub async fn share_result(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<MsgPack<ShareResponse>, AppError> {
    let share_points = state.config.quiz.points.share;

    // The completion check and the award share one store update, so
    // concurrent shares cannot both earn points
    let (progress, points_awarded) = state.store.update_session(
        &session_id,
        |progress, ledger| -> Result<(QuizProgress, u32), AppError> {
            ensure_completed(progress)?;
            let awarded = award_once(ledger, SHARE_ACTION, share_points);
            Ok((progress.clone(), awarded))
        },
    )?;

    if points_awarded > 0 {
        info!(session_id = %session_id, points_awarded, "Result shared");
    }

    let categories = progress.categories();
    let profile = aggregate_profile(&categories);
    let description = describe_profile(&profile, Some(categories.as_slice()));
    let card = ShareCard::new(&profile, &description);

    Ok(MsgPack(ShareResponse {
        text: card.share_text(),
        card,
        points_awarded,
    }))
}

/// Points ledger for a session
///
/// GET /api/v1/sessions/:session_id/points
pub async fn get_points(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<MsgPack<PointsResponse>, AppError> {
    let ledger = state.store.load_ledger(&session_id)?;
    Ok(MsgPack(PointsResponse {
        balance: ledger.balance(),
        transactions: ledger.transactions().to_vec(),
    }))
}
