use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::ledger::{find_challenge, find_reward, CHALLENGES, REWARDS};
use crate::middleware::AuthUser;
use crate::repositories::PointsRepository;

const LEADERBOARD_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct PointsState {
    pub points_repo: PointsRepository,
}

pub async fn balance(State(state): State<PointsState>, auth_user: AuthUser) -> Result<Response> {
    let balance = state.points_repo.balance(&auth_user.id).await?;
    Ok(Json(json!({ "ok": true, "balance": balance })).into_response())
}

pub async fn leaderboard(State(state): State<PointsState>) -> Result<Response> {
    let entries = state.points_repo.leaderboard(LEADERBOARD_LIMIT).await?;
    Ok(Json(json!({ "ok": true, "leaderboard": entries })).into_response())
}

pub async fn list_challenges() -> Response {
    Json(json!({ "ok": true, "challenges": CHALLENGES })).into_response()
}

pub async fn complete_challenge(
    State(state): State<PointsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let challenge =
        find_challenge(&id).ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

    let balance = state
        .points_repo
        .complete_challenge(&auth_user.id, challenge.id, challenge.points)
        .await?;

    Ok(Json(json!({ "ok": true, "balance": balance })).into_response())
}

pub async fn list_rewards() -> Response {
    Json(json!({ "ok": true, "rewards": REWARDS })).into_response()
}

/// POST /api/rewards/{id}/redeem - rejected before any mutation when the
/// balance cannot cover the cost.
pub async fn redeem_reward(
    State(state): State<PointsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let reward =
        find_reward(&id).ok_or_else(|| AppError::NotFound("Reward not found".to_string()))?;

    let balance = state
        .points_repo
        .redeem_reward(&auth_user.id, reward.id, reward.points)
        .await?
        .ok_or_else(|| AppError::BadRequest("Insufficient points".to_string()))?;

    Ok(Json(json!({ "ok": true, "balance": balance })).into_response())
}
