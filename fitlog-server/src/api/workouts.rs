//! Workout logging endpoints
//!
//! All routes act on the signed-in user's workouts.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use fitlog_common::db::{workouts, NewExercise, NewWorkout, Workout};
use fitlog_common::time::parse_workout_date;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::session::CurrentUser;
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
}

/// One logged exercise as sent by the workout form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    pub exercise_name: Option<String>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

impl CreateWorkoutRequest {
    /// Presence checks only
    fn into_new_workout(self) -> Result<NewWorkout, ApiError> {
        let date = self
            .date
            .as_deref()
            .and_then(parse_workout_date)
            .ok_or_else(|| ApiError::BadRequest("A valid workout date is required".to_string()))?;

        let workout_type = self
            .workout_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Workout type is required".to_string()))?;

        if self.exercises.is_empty() {
            return Err(ApiError::BadRequest(
                "Add at least one exercise to the workout".to_string(),
            ));
        }

        let exercises = self
            .exercises
            .into_iter()
            .map(|input| {
                let name = input
                    .exercise_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty());
                match (name, input.reps, input.weight) {
                    (Some(name), Some(reps), Some(weight)) => Ok(NewExercise {
                        name,
                        reps,
                        weight,
                        notes: non_empty(input.notes),
                    }),
                    _ => Err(ApiError::BadRequest(
                        "Each exercise needs a name, reps and weight".to_string(),
                    )),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewWorkout {
            date,
            workout_type,
            notes: non_empty(self.notes),
            exercises,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/workouts
///
/// The user's workouts with exercises and sets, newest first.
pub async fn list_workouts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Workout>>, ApiError> {
    workouts::list_workouts(&state.db, &user.id)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to fetch workouts", e))
}

/// POST /api/workouts
///
/// Creates the workout with one set per exercise and returns it nested.
pub async fn create_workout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Result<Json<Workout>, ApiError> {
    let Json(req) = body?;
    let new_workout = req.into_new_workout()?;

    workouts::create_workout(&state.db, &user.id, new_workout)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to save workout", e))
}

/// DELETE /api/workouts/:id
///
/// 404 for an unknown workout, 403 when it belongs to someone else.
pub async fn delete_workout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to delete workout";

    let owner = workouts::find_workout_owner(&state.db, &id)
        .await
        .map_err(|e| ApiError::internal(FAILURE, e))?
        .ok_or_else(|| ApiError::NotFound("Workout not found".to_string()))?;

    if owner != user.id {
        warn!("User {} tried to delete workout {} owned by {}", user.id, id, owner);
        return Err(ApiError::Forbidden(
            "Unauthorized to delete this workout".to_string(),
        ));
    }

    workouts::delete_workout(&state.db, &id)
        .await
        .map_err(|e| ApiError::internal(FAILURE, e))?;

    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(value: Value) -> CreateWorkoutRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request_converts() {
        let workout = request(json!({
            "date": "2024-05-01",
            "type": "Strength",
            "notes": "",
            "exercises": [
                { "exerciseName": "Squat", "reps": 5, "weight": 100, "notes": "" },
                { "exerciseName": "Bench", "reps": 8, "weight": 62.5, "notes": "paused" }
            ]
        }))
        .into_new_workout()
        .unwrap();

        assert_eq!(workout.workout_type, "Strength");
        assert_eq!(workout.notes, None);
        assert_eq!(workout.exercises.len(), 2);
        assert_eq!(workout.exercises[0].weight, 100.0);
        assert_eq!(workout.exercises[0].notes, None);
        assert_eq!(workout.exercises[1].notes.as_deref(), Some("paused"));
    }

    #[test]
    fn test_presence_checks() {
        let missing_date = request(json!({ "type": "Strength", "exercises": [] }));
        assert!(matches!(missing_date.into_new_workout(), Err(ApiError::BadRequest(_))));

        let blank_type = request(json!({ "date": "2024-05-01", "type": " ", "exercises": [] }));
        assert!(matches!(blank_type.into_new_workout(), Err(ApiError::BadRequest(_))));

        let no_exercises = request(json!({ "date": "2024-05-01", "type": "Run" }));
        assert!(matches!(no_exercises.into_new_workout(), Err(ApiError::BadRequest(_))));

        let unnamed = request(json!({
            "date": "2024-05-01",
            "type": "Run",
            "exercises": [{ "reps": 1, "weight": 0 }]
        }));
        assert!(matches!(unnamed.into_new_workout(), Err(ApiError::BadRequest(_))));
    }
}
