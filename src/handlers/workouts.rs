use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateWorkout, Provider, UpdateWorkout};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

pub async fn list(State(state): State<WorkoutsState>, auth_user: AuthUser) -> Result<Response> {
    let workouts = state.workout_repo.find_by_user(&auth_user.id).await?;
    Ok(Json(json!({ "ok": true, "workouts": workouts })).into_response())
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Json(form): Json<CreateWorkout>,
) -> Result<Response> {
    if form.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let workout = state
        .workout_repo
        .create(
            &auth_user.id,
            &form.title,
            form.provider.unwrap_or(Provider::Fallback),
            &form.plan,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "workout": workout })),
    )
        .into_response())
}

pub async fn show(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let workout = state
        .workout_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    // Verify ownership
    if workout.user_id != auth_user.id {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    Ok(Json(json!({ "ok": true, "workout": workout })).into_response())
}

pub async fn update(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(form): Json<UpdateWorkout>,
) -> Result<Response> {
    let updated = state
        .workout_repo
        .update(&id, &auth_user.id, form.title.as_deref(), form.plan.as_ref())
        .await?;

    if !updated {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    let workout = state
        .workout_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    Ok(Json(json!({ "ok": true, "workout": workout })).into_response())
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.workout_repo.delete(&id, &auth_user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }
    Ok(Json(json!({ "ok": true })).into_response())
}
