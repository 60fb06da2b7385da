use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::CreateNutritionLog;
use crate::repositories::NutritionRepository;

/// The list endpoint never returns more than this many entries.
const LOG_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct NutritionState {
    pub nutrition_repo: NutritionRepository,
}

pub async fn create_log(
    State(state): State<NutritionState>,
    auth_user: AuthUser,
    Json(form): Json<CreateNutritionLog>,
) -> Result<Response> {
    if form.description.trim().is_empty() || form.calories <= 0 {
        return Err(AppError::BadRequest(
            "description and calories are required".to_string(),
        ));
    }

    let log = state.nutrition_repo.create(&auth_user.id, &form).await?;

    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "log": log }))).into_response())
}

pub async fn list_logs(
    State(state): State<NutritionState>,
    auth_user: AuthUser,
) -> Result<Response> {
    let logs = state
        .nutrition_repo
        .find_by_user(&auth_user.id, LOG_LIMIT)
        .await?;
    Ok(Json(json!({ "ok": true, "logs": logs })).into_response())
}

pub async fn delete_log(
    State(state): State<NutritionState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.nutrition_repo.delete(&id, &auth_user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Log not found".to_string()));
    }
    Ok(Json(json!({ "ok": true })).into_response())
}
