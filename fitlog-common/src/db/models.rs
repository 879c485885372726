//! Database models
//!
//! Serialized field names are camelCase to match what the web client reads.

use serde::{Deserialize, Serialize};

/// A user as returned to clients (credentials never leave the database layer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub created_at: String,
}

/// Full user row including credentials
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// Login session backing the session cookie
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
    pub expires_at: String,
}

/// A logged workout with its exercises and sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub workout_id: String,
    pub name: String,
    /// Order within the workout, starting at 0
    pub position: i64,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: String,
    pub exercise_id: String,
    pub reps: i64,
    pub weight: f64,
    pub notes: Option<String>,
}

/// Input for creating a workout
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub date: chrono::DateTime<chrono::Utc>,
    pub workout_type: String,
    pub notes: Option<String>,
    pub exercises: Vec<NewExercise>,
}

/// One logged exercise with its single set
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub reps: i64,
    pub weight: f64,
    pub notes: Option<String>,
}
