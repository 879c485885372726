//! Registration, login and logout
//!
//! One endpoint, `POST /api/auth`, dispatching on the `action` field.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use fitlog_common::db::{sessions, users, User};
use fitlog_common::password::verify_password;
use fitlog_common::Error;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::session::{clear_session_cookie, session_cookie, session_token};
use crate::{ApiError, AppState};

const FAILURE: &str = "Authentication failed";

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub action: Option<String>,
}

/// POST /api/auth
///
/// - `register`: 400 if the email is taken, otherwise the new user
/// - `login`: 401 on unknown email or wrong password, otherwise the user and a session cookie
/// - `logout`: ends the current session
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;

    match req.action.as_deref() {
        Some("register") => {
            let (email, password) = credentials(&req)?;
            let user = register(&state, email, password).await?;
            Ok(Json(user).into_response())
        }
        Some("login") => {
            let (email, password) = credentials(&req)?;
            login(&state, email, password).await
        }
        Some("logout") => logout(&state, &headers).await,
        _ => Err(ApiError::BadRequest("Invalid action".to_string())),
    }
}

fn credentials(req: &AuthRequest) -> Result<(&str, &str), ApiError> {
    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".to_string()));
    }
    Ok((email, password))
}

async fn register(state: &AppState, email: &str, password: &str) -> Result<User, ApiError> {
    let name = users::name_from_email(email);
    match users::create_user(&state.db, Some(&name), email, password).await {
        Ok(user) => Ok(user),
        Err(Error::InvalidInput(msg)) => {
            info!("Registration rejected for {}: {}", email, msg);
            Err(ApiError::BadRequest(msg))
        }
        Err(e) => Err(ApiError::internal(FAILURE, e)),
    }
}

async fn login(state: &AppState, email: &str, password: &str) -> Result<Response, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let record = users::find_user_by_email(&state.db, email)
        .await
        .map_err(|e| ApiError::internal(FAILURE, e))?
        .ok_or_else(|| {
            warn!("Login attempt for unknown email {}", email);
            invalid()
        })?;

    if !verify_password(password, &record.password_hash) {
        warn!("Wrong password for {}", email);
        return Err(invalid());
    }

    let ttl = state.config.session_ttl;
    let session = sessions::create_session(&state.db, &record.id, ttl)
        .await
        .map_err(|e| ApiError::internal(FAILURE, e))?;

    info!("User {} signed in", record.id);
    let user = User::from(record);
    Ok((
        [(header::SET_COOKIE, session_cookie(&session.token, ttl))],
        Json(user),
    )
        .into_response())
}

async fn logout(state: &AppState, headers: &HeaderMap) -> Result<Response, ApiError> {
    if let Some(token) = session_token(headers) {
        sessions::delete_session(&state.db, &token)
            .await
            .map_err(|e| ApiError::internal(FAILURE, e))?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response())
}
