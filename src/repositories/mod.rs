pub mod nutrition_repo;
pub mod points_repo;
pub mod post_repo;
pub mod session_repo;
pub mod user_repo;
pub mod workout_repo;

pub use nutrition_repo::NutritionRepository;
pub use points_repo::PointsRepository;
pub use post_repo::PostRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;
pub use workout_repo::WorkoutRepository;
