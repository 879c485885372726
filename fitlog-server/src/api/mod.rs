//! HTTP API handlers for fitlog-server

pub mod auth;
pub mod health;
pub mod users;
pub mod workouts;

pub use auth::authenticate;
pub use health::{get_build_info, health_routes};
pub use users::{create_user, list_users};
pub use workouts::{create_workout, delete_workout, list_workouts};
