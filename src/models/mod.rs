use rusqlite::Row;

pub mod nutrition;
pub mod plan;
pub mod post;
pub mod user;
pub mod workout;

pub use nutrition::{CreateNutritionLog, NutritionLog};
pub use plan::{
    Experience, Goal, PlanExercise, PlanRequest, Provider, Week, WeekType, WorkoutDay, WorkoutPlan,
};
pub use post::{Comment, CreateComment, CreatePost, Post, PostWithComments};
pub use user::{CreateUser, LoginCredentials, UpdateProfile, User};
pub use workout::{CreateWorkout, UpdateWorkout, WorkoutRecord};

pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
