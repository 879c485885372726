//! Database models and queries

pub mod init;
pub mod models;
pub mod sessions;
pub mod users;
pub mod workouts;

pub use init::*;
pub use models::*;
