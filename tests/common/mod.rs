use std::time::Duration;

use axum::Router;

use fitpulse::ai::{AiConfig, AiGateway};
use fitpulse::db::{create_memory_pool, DbPool};
use fitpulse::handlers::{ai, auth, health, nutrition, points, posts, workouts};
use fitpulse::migrations::run_migrations_for_tests;
use fitpulse::models::{CreateUser, User};
use fitpulse::repositories::{
    NutritionRepository, PointsRepository, PostRepository, SessionRepository, UserRepository,
    WorkoutRepository,
};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    // Disabled gateway: every AI route exercises the deterministic fallback.
    let gateway = AiGateway::new(AiConfig {
        enabled: false,
        api_key: None,
        base_url: "http://localhost:0".to_string(),
        model: "test".to_string(),
        timeout: Duration::from_secs(1),
    })
    .expect("Failed to build AI gateway");

    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());
    let nutrition_repo = NutritionRepository::new(pool.clone());
    let post_repo = PostRepository::new(pool.clone());
    let points_repo = PointsRepository::new(pool.clone());

    let auth_state = auth::AuthState {
        user_repo: user_repo.clone(),
        session_repo: session_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
    };
    let ai_state = ai::AiState { gateway };
    let nutrition_state = nutrition::NutritionState {
        nutrition_repo: nutrition_repo.clone(),
    };
    let posts_state = posts::PostsState {
        post_repo: post_repo.clone(),
        points_repo: points_repo.clone(),
    };
    let points_state = points::PointsState {
        points_repo: points_repo.clone(),
    };
    let health_state = health::HealthState { pool: pool.clone() };

    fitpulse::routes::create_router(
        auth_state,
        workouts_state,
        ai_state,
        nutrition_state,
        posts_state,
        points_state,
        health_state,
        session_repo,
        user_repo,
    )
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &DbPool, email: &str, password: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo
        .create(&CreateUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            gym_level: None,
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_session_cookie(pool: &DbPool, user: &User) -> String {
    let session_repo = SessionRepository::new(pool.clone());
    let token = session_repo.create(&user.id).await.unwrap();
    format!("session={token}")
}
