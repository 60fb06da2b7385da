use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::repositories::{SessionRepository, UserRepository};
use crate::session::get_session_token;

/// The authenticated caller, resolved from the session cookie.
///
/// The SPA consumes JSON, so a missing or stale session rejects with a 401
/// body rather than a login redirect.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
}

impl AuthUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    async fn resolve(parts: &Parts) -> Result<Option<Self>, AppError> {
        let session_repo = parts
            .extensions
            .get::<SessionRepository>()
            .ok_or_else(|| AppError::Internal("session repository not configured".to_string()))?;
        let user_repo = parts
            .extensions
            .get::<UserRepository>()
            .ok_or_else(|| AppError::Internal("user repository not configured".to_string()))?;

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = get_session_token(&jar) else {
            return Ok(None);
        };

        let Some(user_id) = session_repo.find_valid(&token).await? else {
            return Ok(None);
        };

        let Some(user) = user_repo.find_by_id(&user_id).await? else {
            return Ok(None);
        };

        Ok(Some(Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
        }))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthUser::resolve(parts).await?.ok_or(AppError::Unauthorized)
    }
}
