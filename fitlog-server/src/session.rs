//! Session cookie handling and the current-user extractor

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use fitlog_common::db::{sessions, User};

use crate::{ApiError, AppState};

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "fitlog_session";

/// Pull the session token out of the `Cookie` header(s)
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value starting a session
pub fn session_cookie(token: &str, ttl: chrono::Duration) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl.num_seconds().max(0)
    )
}

/// `Set-Cookie` value ending a session
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// The signed-in user, resolved from the session cookie
///
/// Rejects with 400 "No user found" when the cookie is missing, unknown or
/// expired.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(ApiError::no_user)?;

        match sessions::find_session_user(&state.db, &token).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => Err(ApiError::no_user()),
            Err(e) => Err(ApiError::internal("Failed to load session", e)),
        }
    }
}
