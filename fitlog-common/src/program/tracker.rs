//! Per-set weight tracking for a selected program
//!
//! Weight and completion edits stay in the tracker until `save_weights`
//! writes them into the current week and persists the whole collection.

use crate::program::catalog::ProgramCatalog;
use crate::program::model::WorkoutProgram;
use crate::program::store::ProgramStore;
use crate::{time, Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProgramTracker {
    program_id: String,
    total_weeks: usize,
    current_week: usize,
    weight_inputs: HashMap<String, Vec<f64>>,
    set_counts: HashMap<String, usize>,
    completed: HashMap<String, bool>,
    completed_dates: HashMap<String, String>,
    unsaved: bool,
}

impl ProgramTracker {
    /// Start tracking a program at week 1
    pub fn select(program: &WorkoutProgram) -> Self {
        let mut weight_inputs = HashMap::new();
        let mut set_counts = HashMap::new();
        let mut completed = HashMap::new();
        let mut completed_dates = HashMap::new();

        for exercise in program.exercises() {
            let weights = if exercise.weights.is_empty() {
                vec![0.0; exercise.sets as usize]
            } else {
                exercise.weights.clone()
            };
            weight_inputs.insert(exercise.id.clone(), weights);
            set_counts.insert(exercise.id.clone(), exercise.sets as usize);

            if exercise.completed == Some(true) {
                completed.insert(exercise.id.clone(), true);
                if let Some(date) = &exercise.completed_date {
                    completed_dates.insert(exercise.id.clone(), date.clone());
                }
            }
        }

        Self {
            program_id: program.id.clone(),
            total_weeks: program.weeks.len(),
            current_week: 1,
            weight_inputs,
            set_counts,
            completed,
            completed_dates,
            unsaved: false,
        }
    }

    pub fn program_id(&self) -> &str {
        &self.program_id
    }

    /// 1-based week being viewed
    pub fn current_week(&self) -> usize {
        self.current_week
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn weights(&self, exercise_id: &str) -> Option<&[f64]> {
        self.weight_inputs.get(exercise_id).map(Vec::as_slice)
    }

    pub fn is_completed(&self, exercise_id: &str) -> bool {
        self.completed.get(exercise_id).copied().unwrap_or(false)
    }

    pub fn completed_date(&self, exercise_id: &str) -> Option<&str> {
        self.completed_dates.get(exercise_id).map(String::as_str)
    }

    pub fn prev_week(&mut self) {
        if self.current_week > 1 {
            self.current_week -= 1;
        }
    }

    pub fn next_week(&mut self) {
        if self.current_week < self.total_weeks {
            self.current_week += 1;
        }
    }

    /// Jump straight to a week; out-of-range numbers are clamped
    pub fn go_to_week(&mut self, week: usize) {
        self.current_week = week.clamp(1, self.total_weeks.max(1));
    }

    /// Record the weight typed for one set
    ///
    /// Empty or unparseable input counts as 0. Missing earlier sets are
    /// filled with 0. `set_index` must be below the exercise's set count (or
    /// the number of weights already stored, if larger).
    pub fn set_weight(&mut self, exercise_id: &str, set_index: usize, raw: &str) -> Result<()> {
        let sets = self
            .set_counts
            .get(exercise_id)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("Exercise {}", exercise_id)))?;

        let weights = self.weight_inputs.entry(exercise_id.to_string()).or_default();
        let limit = sets.max(weights.len());
        if set_index >= limit {
            return Err(Error::InvalidInput(format!(
                "Set {} is out of range (exercise has {} sets)",
                set_index.saturating_add(1),
                limit
            )));
        }

        let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0);
        if weights.len() <= set_index {
            weights.resize(set_index + 1, 0.0);
        }
        weights[set_index] = value;
        self.unsaved = true;
        Ok(())
    }

    /// Flip completion for an exercise; the date is kept only while completed
    pub fn toggle_complete(&mut self, exercise_id: &str, now: DateTime<Utc>) -> bool {
        let done = !self.is_completed(exercise_id);
        self.completed.insert(exercise_id.to_string(), done);
        if done {
            self.completed_dates
                .insert(exercise_id.to_string(), time::to_storage(now));
        } else {
            self.completed_dates.remove(exercise_id);
        }
        self.unsaved = true;
        done
    }

    /// Write tracked weights and completion into the current week and persist
    pub fn save_weights<S: ProgramStore>(&mut self, catalog: &mut ProgramCatalog<S>) -> Result<()> {
        let mut program = catalog
            .get(&self.program_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Program {}", self.program_id)))?;

        let week_number = self.current_week;
        let week = program
            .week_mut(week_number)
            .ok_or_else(|| Error::InvalidInput(format!("Week {} does not exist", week_number)))?;

        let mut updated = 0;
        for exercise in week.days.iter_mut().flat_map(|d| d.exercises.iter_mut()) {
            if let Some(weights) = self.weight_inputs.get(&exercise.id) {
                exercise.weights = weights.clone();
                updated += 1;
            }
            if let Some(done) = self.completed.get(&exercise.id) {
                exercise.completed = Some(*done);
                exercise.completed_date = self.completed_dates.get(&exercise.id).cloned();
            }
        }

        program.current_week = week_number;
        catalog.replace(program)?;
        self.unsaved = false;

        info!(
            "Saved weights for program {} week {} ({} exercises)",
            self.program_id, week_number, updated
        );
        Ok(())
    }
}
