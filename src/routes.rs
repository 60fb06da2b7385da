use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::handlers::{ai, auth, health, nutrition, points, posts, workouts};
use crate::repositories::{SessionRepository, UserRepository};

#[allow(clippy::too_many_arguments)]
pub fn create_router(
    auth_state: auth::AuthState,
    workouts_state: workouts::WorkoutsState,
    ai_state: ai::AiState,
    nutrition_state: nutrition::NutritionState,
    posts_state: posts::PostsState,
    points_state: points::PointsState,
    health_state: health::HealthState,
    session_repo: SessionRepository,
    user_repo: UserRepository,
) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health))
        .with_state(health_state)
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/profile", axum::routing::put(auth::update_profile))
        .with_state(auth_state)
        // Workout plan documents
        .route("/api/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/api/workouts/{id}",
            get(workouts::show)
                .put(workouts::update)
                .delete(workouts::delete),
        )
        .with_state(workouts_state)
        // AI generation (with deterministic fallback)
        .route("/api/ai/workout", post(ai::generate_workout))
        .route("/api/ai/nutrition", post(ai::analyze_nutrition))
        .with_state(ai_state)
        // Nutrition logs
        .route(
            "/api/nutrition/logs",
            get(nutrition::list_logs).post(nutrition::create_log),
        )
        .route(
            "/api/nutrition/logs/{id}",
            axum::routing::delete(nutrition::delete_log),
        )
        .with_state(nutrition_state)
        // Community feed
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/posts/{id}", axum::routing::delete(posts::delete))
        .route("/api/posts/{id}/comments", post(posts::add_comment))
        .route(
            "/api/posts/{id}/comments/{comment_id}",
            axum::routing::delete(posts::delete_comment),
        )
        .route("/api/posts/{id}/like", post(posts::toggle_like))
        .with_state(posts_state)
        // Gamification
        .route("/api/points", get(points::balance))
        .route("/api/leaderboard", get(points::leaderboard))
        .route("/api/challenges", get(points::list_challenges))
        .route(
            "/api/challenges/{id}/complete",
            post(points::complete_challenge),
        )
        .route("/api/rewards", get(points::list_rewards))
        .route("/api/rewards/{id}/redeem", post(points::redeem_reward))
        .with_state(points_state)
        // Repositories the AuthUser extractor resolves sessions through
        .layer(Extension(session_repo))
        .layer(Extension(user_repo))
}
