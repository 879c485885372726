//! Workout queries
//!
//! A workout is written in one transaction together with its exercises and
//! their sets. Reads assemble the nested structure from three flat queries.

use crate::db::models::{Exercise, NewWorkout, Workout, WorkoutSet};
use crate::{time, uuid_utils, Error, Result};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;
use tracing::info;

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: String,
    user_id: String,
    date: String,
    #[sqlx(rename = "type")]
    workout_type: String,
    notes: Option<String>,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    id: String,
    workout_id: String,
    name: String,
    position: i64,
}

/// Create a workout with one set per exercise and return it fully nested
pub async fn create_workout(pool: &SqlitePool, user_id: &str, input: NewWorkout) -> Result<Workout> {
    let mut tx = pool.begin().await?;

    let workout_id = uuid_utils::new_id();
    let created_at = time::now_string();
    let date = time::to_storage(input.date);

    sqlx::query(
        "INSERT INTO workouts (id, user_id, date, type, notes, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&workout_id)
    .bind(user_id)
    .bind(&date)
    .bind(&input.workout_type)
    .bind(&input.notes)
    .bind(&created_at)
    .execute(&mut *tx)
    .await?;

    let mut exercises = Vec::with_capacity(input.exercises.len());
    for (index, new_exercise) in input.exercises.into_iter().enumerate() {
        let position = index as i64;
        let exercise_id = uuid_utils::new_id();
        sqlx::query("INSERT INTO exercises (id, workout_id, name, position) VALUES (?, ?, ?, ?)")
            .bind(&exercise_id)
            .bind(&workout_id)
            .bind(&new_exercise.name)
            .bind(position)
            .execute(&mut *tx)
            .await?;

        let set = WorkoutSet {
            id: uuid_utils::new_id(),
            exercise_id: exercise_id.clone(),
            reps: new_exercise.reps,
            weight: new_exercise.weight,
            notes: new_exercise.notes,
        };
        insert_set(&mut tx, &set, 0).await?;

        exercises.push(Exercise {
            id: exercise_id,
            workout_id: workout_id.clone(),
            name: new_exercise.name,
            position,
            sets: vec![set],
        });
    }

    tx.commit().await?;

    info!(
        "Saved workout {} for user {} ({} exercises)",
        workout_id,
        user_id,
        exercises.len()
    );

    Ok(Workout {
        id: workout_id,
        user_id: user_id.to_string(),
        date,
        workout_type: input.workout_type,
        notes: input.notes,
        created_at,
        exercises,
    })
}

async fn insert_set(tx: &mut Transaction<'_, Sqlite>, set: &WorkoutSet, position: i64) -> Result<()> {
    sqlx::query(
        "INSERT INTO sets (id, exercise_id, reps, weight, notes, position) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&set.id)
    .bind(&set.exercise_id)
    .bind(set.reps)
    .bind(set.weight)
    .bind(&set.notes)
    .bind(position)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// A user's workouts, newest date first, with exercises and sets
pub async fn list_workouts(pool: &SqlitePool, user_id: &str) -> Result<Vec<Workout>> {
    let workouts = sqlx::query_as::<_, WorkoutRow>(
        r#"
        SELECT id, user_id, date, type, notes, created_at
        FROM workouts
        WHERE user_id = ?
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let exercise_rows = sqlx::query_as::<_, ExerciseRow>(
        r#"
        SELECT e.id, e.workout_id, e.name, e.position
        FROM exercises e
        JOIN workouts w ON w.id = e.workout_id
        WHERE w.user_id = ?
        ORDER BY e.workout_id, e.position
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let set_rows = sqlx::query_as::<_, WorkoutSet>(
        r#"
        SELECT s.id, s.exercise_id, s.reps, s.weight, s.notes
        FROM sets s
        JOIN exercises e ON e.id = s.exercise_id
        JOIN workouts w ON w.id = e.workout_id
        WHERE w.user_id = ?
        ORDER BY s.exercise_id, s.position
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut sets_by_exercise: HashMap<String, Vec<WorkoutSet>> = HashMap::new();
    for set in set_rows {
        sets_by_exercise
            .entry(set.exercise_id.clone())
            .or_default()
            .push(set);
    }

    let mut exercises_by_workout: HashMap<String, Vec<Exercise>> = HashMap::new();
    for row in exercise_rows {
        let sets = sets_by_exercise.remove(&row.id).unwrap_or_default();
        exercises_by_workout
            .entry(row.workout_id.clone())
            .or_default()
            .push(Exercise {
                id: row.id,
                workout_id: row.workout_id,
                name: row.name,
                position: row.position,
                sets,
            });
    }

    Ok(workouts
        .into_iter()
        .map(|w| {
            let exercises = exercises_by_workout.remove(&w.id).unwrap_or_default();
            Workout {
                id: w.id,
                user_id: w.user_id,
                date: w.date,
                workout_type: w.workout_type,
                notes: w.notes,
                created_at: w.created_at,
                exercises,
            }
        })
        .collect())
}

/// Owner of a workout, or `None` if no such workout exists
pub async fn find_workout_owner(pool: &SqlitePool, workout_id: &str) -> Result<Option<String>> {
    let owner = sqlx::query_scalar::<_, String>("SELECT user_id FROM workouts WHERE id = ?")
        .bind(workout_id)
        .fetch_optional(pool)
        .await?;
    Ok(owner)
}

/// Delete a workout; its exercises and sets go with it
pub async fn delete_workout(pool: &SqlitePool, workout_id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
        .bind(workout_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Workout {}", workout_id)));
    }

    info!("Deleted workout {}", workout_id);
    Ok(())
}
