//! User queries

use crate::db::models::{User, UserRecord};
use crate::password::hash_password;
use crate::{time, uuid_utils, Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Look up a user (with credentials) by email
pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRecord>> {
    let user = sqlx::query_as::<_, UserRecord>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_user_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Create a user with a hashed password
///
/// Returns `Error::InvalidInput("User already exists")` when the email is taken.
pub async fn create_user(
    pool: &SqlitePool,
    name: Option<&str>,
    email: &str,
    password: &str,
) -> Result<User> {
    if find_user_by_email(pool, email).await?.is_some() {
        return Err(Error::InvalidInput("User already exists".to_string()));
    }

    let password_hash = hash_password(password)?;
    let user = User {
        id: uuid_utils::new_id(),
        name: name.map(str::to_string),
        email: email.to_string(),
        created_at: time::now_string(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&password_hash)
    .bind(&user.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        // Lost a race against a concurrent insert of the same email
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(Error::InvalidInput("User already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    info!("Created user {} ({})", user.id, user.email);
    Ok(user)
}

/// All users, oldest first
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at FROM users ORDER BY created_at ASC, rowid ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// The earliest-created user, if any
pub async fn first_user(pool: &SqlitePool) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at FROM users ORDER BY created_at ASC, rowid ASC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Display name derived from an email address (the part before `@`)
pub fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}
