//! fitlog-server library - HTTP API for workout logging
//!
//! Thin JSON handlers over the fitlog-common database layer. Sessions are
//! carried in the `fitlog_session` cookie issued at login.

use axum::Router;
use fitlog_common::config::ServerConfig;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod session;

pub use error::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Effective server settings
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, config: ServerConfig) -> Self {
        Self { db, config }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    let api = Router::new()
        .route("/api/auth", post(api::authenticate))
        .route("/api/users", get(api::list_users).post(api::create_user))
        .route("/api/workouts", get(api::list_workouts).post(api::create_workout))
        .route("/api/workouts/:id", delete(api::delete_workout))
        .route("/api/buildinfo", get(api::get_build_info));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
