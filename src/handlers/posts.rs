use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::ledger::{COMMENT_ADDED, COMMENT_DELETED, LIKE_RECEIVED, POST_CREATED, POST_DELETED};
use crate::middleware::AuthUser;
use crate::models::{CreateComment, CreatePost};
use crate::repositories::{PointsRepository, PostRepository};

/// The feed never returns more than this many posts.
const FEED_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct PostsState {
    pub post_repo: PostRepository,
    pub points_repo: PointsRepository,
}

/// GET /api/posts - the feed is public, newest first.
pub async fn list(State(state): State<PostsState>) -> Result<Response> {
    let posts = state.post_repo.list(FEED_LIMIT).await?;
    Ok(Json(json!({ "ok": true, "posts": posts })).into_response())
}

pub async fn create(
    State(state): State<PostsState>,
    auth_user: AuthUser,
    Json(form): Json<CreatePost>,
) -> Result<Response> {
    if form.content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }

    let post = state.post_repo.create(&auth_user, &form.content).await?;
    state
        .points_repo
        .apply_delta(&auth_user.id, POST_CREATED)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "post": post }))).into_response())
}

pub async fn delete(
    State(state): State<PostsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.post_repo.delete(&id, &auth_user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    state
        .points_repo
        .apply_delta(&auth_user.id, POST_DELETED)
        .await?;

    Ok(Json(json!({ "ok": true })).into_response())
}

pub async fn add_comment(
    State(state): State<PostsState>,
    auth_user: AuthUser,
    Path(post_id): Path<String>,
    Json(form): Json<CreateComment>,
) -> Result<Response> {
    if form.content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }

    state
        .post_repo
        .find_by_id(&post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let comment = state
        .post_repo
        .add_comment(&post_id, &auth_user, &form.content)
        .await?;
    state
        .points_repo
        .apply_delta(&auth_user.id, COMMENT_ADDED)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "comment": comment })),
    )
        .into_response())
}

pub async fn delete_comment(
    State(state): State<PostsState>,
    auth_user: AuthUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Response> {
    let deleted = state
        .post_repo
        .delete_comment(&post_id, &comment_id, &auth_user.id)
        .await?;
    if !deleted {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }

    state
        .points_repo
        .apply_delta(&auth_user.id, COMMENT_DELETED)
        .await?;

    Ok(Json(json!({ "ok": true })).into_response())
}

/// POST /api/posts/{id}/like - toggles. A fresh like awards a point to the
/// post's author; removing a like claws nothing back.
pub async fn toggle_like(
    State(state): State<PostsState>,
    auth_user: AuthUser,
    Path(post_id): Path<String>,
) -> Result<Response> {
    let post = state
        .post_repo
        .find_by_id(&post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let (liked, likes) = state.post_repo.toggle_like(&post_id, &auth_user.id).await?;

    if liked {
        state
            .points_repo
            .apply_delta(&post.user_id, LIKE_RECEIVED)
            .await?;
    }

    Ok(Json(json!({ "ok": true, "liked": liked, "likes": likes })).into_response())
}
