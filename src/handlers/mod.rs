pub mod ai;
pub mod auth;
pub mod health;
pub mod nutrition;
pub mod points;
pub mod posts;
pub mod workouts;
