//! Login sessions
//!
//! A session token is 256 random bits, hex encoded. Expired sessions are
//! treated as absent, removed when looked up, and swept whenever a new
//! session is created.

use crate::db::models::{Session, User};
use crate::password::random_token;
use crate::{time, Result};
use sqlx::SqlitePool;
use tracing::debug;

const TOKEN_BYTES: usize = 32;

/// Start a session for a user lasting `ttl`
pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    ttl: chrono::Duration,
) -> Result<Session> {
    let now = time::now();
    purge_expired_sessions(pool).await?;

    let session = Session {
        token: random_token(TOKEN_BYTES),
        user_id: user_id.to_string(),
        created_at: time::to_storage(now),
        expires_at: time::to_storage(now + ttl),
    };

    sqlx::query("INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)")
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(&session.created_at)
        .bind(&session.expires_at)
        .execute(pool)
        .await?;

    debug!("Created session for user {}", user_id);
    Ok(session)
}

/// Delete every session whose expiry has passed, returning how many went
pub async fn purge_expired_sessions(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(time::now_string())
        .execute(pool)
        .await?;

    let purged = result.rows_affected();
    if purged > 0 {
        debug!("Purged {} expired sessions", purged);
    }
    Ok(purged)
}

/// Resolve a session token to its user
pub async fn find_session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let session = sqlx::query_as::<_, Session>(
        "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    let Some(session) = session else {
        return Ok(None);
    };

    // Storage format is fixed-width RFC 3339 UTC, so string order is time order
    if session.expires_at <= time::now_string() {
        debug!("Session for user {} expired", session.user_id);
        delete_session(pool, token).await?;
        return Ok(None);
    }

    crate::db::users::find_user_by_id(pool, &session.user_id).await
}

/// End a session (no-op if the token is unknown)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
