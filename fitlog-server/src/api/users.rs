//! User listing and creation

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use fitlog_common::db::{users, User};
use fitlog_common::Error;
use serde::Deserialize;

use crate::{ApiError, AppState};

/// Password given to users created through `POST /api/users`
pub const DEMO_PASSWORD: &str = "demo-password";

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    users::list_users(&state.db)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to fetch users", e))
}

/// POST /api/users
///
/// Creates a user with the fixed demo password.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(req) = body?;

    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(ApiError::BadRequest("Email is required".to_string()));
    }
    let name = req.name.as_deref().map(str::trim).filter(|n| !n.is_empty());

    match users::create_user(&state.db, name, email, DEMO_PASSWORD).await {
        Ok(user) => Ok(Json(user)),
        Err(Error::InvalidInput(msg)) => Err(ApiError::BadRequest(msg)),
        Err(e) => Err(ApiError::internal("Failed to create user", e)),
    }
}
