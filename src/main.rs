use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitpulse::ai::AiGateway;
use fitpulse::config::Config;
use fitpulse::handlers::{ai, auth, health, nutrition, points, posts, workouts};
use fitpulse::repositories::{
    NutritionRepository, PointsRepository, PostRepository, SessionRepository, UserRepository,
    WorkoutRepository,
};
use fitpulse::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitpulse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    // Create database pool
    let pool = db::create_pool(&config.database_url)?;

    // Run migrations
    migrations::run_migrations(&pool)?;

    // AI gateway (falls back to the deterministic generators when disabled)
    let gateway = AiGateway::new(config.ai.clone())?;

    // Create repositories
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());
    let nutrition_repo = NutritionRepository::new(pool.clone());
    let post_repo = PostRepository::new(pool.clone());
    let points_repo = PointsRepository::new(pool.clone());

    // Expired sessions otherwise linger until their token is presented again
    session_repo.cleanup_expired().await?;

    // Create handler states
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

    // Build router
    let app = routes::create_router(
        auth_state,
        workouts_state,
        ai_state,
        nutrition_state,
        posts_state,
        points_state,
        health_state,
        session_repo,
        user_repo,
    );

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
