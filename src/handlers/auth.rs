use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateUser, LoginCredentials, UpdateProfile};
use crate::repositories::{SessionRepository, UserRepository};
use crate::session::{create_session_cookie, get_session_token, remove_session_cookie};

#[derive(Clone)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
}

pub async fn register(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(form): Json<CreateUser>,
) -> Result<Response> {
    if form.first_name.trim().is_empty()
        || form.last_name.trim().is_empty()
        || form.email.trim().is_empty()
    {
        return Err(AppError::BadRequest("Missing fields".to_string()));
    }
    if form.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if state.user_repo.find_by_email(&form.email).await?.is_some() {
        return Err(AppError::Conflict("Email already used".to_string()));
    }

    let user = state.user_repo.create(&form).await?;
    let token = state.session_repo.create(&user.id).await?;
    let jar = jar.add(create_session_cookie(&token));

    Ok((StatusCode::CREATED, jar, Json(json!({ "user": user }))).into_response())
}

pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(credentials): Json<LoginCredentials>,
) -> Result<Response> {
    let user = state
        .user_repo
        .verify_password(&credentials.email, &credentials.password)
        .await?;

    match user {
        Some(user) => {
            let token = state.session_repo.create(&user.id).await?;
            let jar = jar.add(create_session_cookie(&token));
            Ok((jar, Json(json!({ "user": user }))).into_response())
        }
        None => Err(AppError::Unauthorized),
    }
}

pub async fn logout(
    State(state): State<AuthState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Response> {
    if let Some(token) = get_session_token(&CookieJar::from_headers(&headers)) {
        state.session_repo.delete(&token).await?;
    }
    let jar = jar.add(remove_session_cookie());
    Ok((jar, Json(json!({ "ok": true }))).into_response())
}

pub async fn me(State(state): State<AuthState>, auth_user: AuthUser) -> Result<Response> {
    let user = state
        .user_repo
        .find_by_id(&auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": user })).into_response())
}

pub async fn update_profile(
    State(state): State<AuthState>,
    auth_user: AuthUser,
    Json(form): Json<UpdateProfile>,
) -> Result<Response> {
    state.user_repo.update_profile(&auth_user.id, &form).await?;

    let user = state
        .user_repo
        .find_by_id(&auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": user })).into_response())
}
