//! Program creation wizard
//!
//! A draft is filled in step by step: exercises are added to the day being
//! edited, finished days are appended to the draft, and `build` turns the
//! draft into a multi-week program.

use crate::program::model::{ProgramExercise, Week, WorkoutDay, WorkoutProgram};
use crate::uuid_utils;
use thiserror::Error;

/// Default program length in weeks
pub const DEFAULT_WEEKS: usize = 4;

/// Presence-check failures, worded for display to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Exercise name is required")]
    MissingExerciseName,

    #[error("Day name is required")]
    MissingDayName,

    #[error("Add at least one exercise to the day")]
    EmptyDay,

    #[error("Please enter a program name")]
    MissingProgramName,
}

/// Exercise being entered in the form
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub notes: String,
}

impl Default for ExerciseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: 3,
            reps: 10,
            notes: String::new(),
        }
    }
}

impl ExerciseDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgramDraft {
    pub name: String,
    pub description: String,
    pub weeks: usize,
    day_name: String,
    day_exercises: Vec<ProgramExercise>,
    days: Vec<WorkoutDay>,
}

impl Default for ProgramDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            weeks: DEFAULT_WEEKS,
            day_name: String::new(),
            day_exercises: Vec::new(),
            days: Vec::new(),
        }
    }
}

impl ProgramDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_day_name(&mut self, name: impl Into<String>) {
        self.day_name = name.into();
    }

    pub fn current_day_exercises(&self) -> &[ProgramExercise] {
        &self.day_exercises
    }

    pub fn days(&self) -> &[WorkoutDay] {
        &self.days
    }

    /// Append an exercise to the day being edited
    pub fn add_exercise(&mut self, draft: ExerciseDraft) -> Result<&ProgramExercise, DraftError> {
        if draft.name.trim().is_empty() {
            return Err(DraftError::MissingExerciseName);
        }

        self.day_exercises.push(ProgramExercise {
            id: uuid_utils::new_id(),
            name: draft.name,
            sets: draft.sets,
            reps: draft.reps,
            notes: draft.notes,
            ..Default::default()
        });

        Ok(&self.day_exercises[self.day_exercises.len() - 1])
    }

    /// Drop an exercise from the day being edited; returns whether it existed
    pub fn remove_exercise(&mut self, exercise_id: &str) -> bool {
        let before = self.day_exercises.len();
        self.day_exercises.retain(|e| e.id != exercise_id);
        self.day_exercises.len() != before
    }

    /// Finish the day being edited and start a fresh one
    pub fn add_day(&mut self) -> Result<&WorkoutDay, DraftError> {
        if self.day_name.trim().is_empty() {
            return Err(DraftError::MissingDayName);
        }
        if self.day_exercises.is_empty() {
            return Err(DraftError::EmptyDay);
        }

        self.days.push(WorkoutDay {
            id: uuid_utils::new_id(),
            name: std::mem::take(&mut self.day_name),
            exercises: std::mem::take(&mut self.day_exercises),
        });

        Ok(&self.days[self.days.len() - 1])
    }

    pub fn remove_day(&mut self, index: usize) -> Option<WorkoutDay> {
        (index < self.days.len()).then(|| self.days.remove(index))
    }

    /// Produce the program
    ///
    /// Every week gets its own copy of the drafted days with fresh ids. With
    /// no drafted days, each week gets `weeks` empty days named `Day N`.
    pub fn build(&self) -> Result<WorkoutProgram, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingProgramName);
        }

        let week_count = self.weeks.max(1);
        let template: Vec<WorkoutDay> = if self.days.is_empty() {
            (1..=week_count)
                .map(|n| WorkoutDay {
                    id: String::new(),
                    name: format!("Day {}", n),
                    exercises: Vec::new(),
                })
                .collect()
        } else {
            self.days.clone()
        };

        let weeks = (0..week_count)
            .map(|_| Week {
                id: uuid_utils::new_id(),
                days: template.iter().map(fresh_day).collect(),
            })
            .collect();

        Ok(WorkoutProgram {
            id: uuid_utils::new_id(),
            name: name.to_string(),
            description: self.description.clone(),
            weeks,
            current_week: 1,
        })
    }
}

fn fresh_day(day: &WorkoutDay) -> WorkoutDay {
    WorkoutDay {
        id: uuid_utils::new_id(),
        name: day.name.clone(),
        exercises: day
            .exercises
            .iter()
            .map(|e| ProgramExercise {
                id: uuid_utils::new_id(),
                ..e.clone()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_exercise_requires_name() {
        let mut draft = ProgramDraft::new();
        assert_eq!(
            draft.add_exercise(ExerciseDraft::default()).unwrap_err(),
            DraftError::MissingExerciseName
        );
        assert!(draft.current_day_exercises().is_empty());
    }

    #[test]
    fn test_day_requires_name_and_exercise() {
        let mut draft = ProgramDraft::new();
        assert_eq!(draft.add_day().unwrap_err(), DraftError::MissingDayName);

        draft.set_day_name("Push");
        assert_eq!(draft.add_day().unwrap_err(), DraftError::EmptyDay);

        draft.add_exercise(ExerciseDraft::named("Bench")).unwrap();
        let day = draft.add_day().unwrap();
        assert_eq!(day.name, "Push");
        assert_eq!(day.exercises.len(), 1);
        assert!(draft.current_day_exercises().is_empty());
    }

    #[test]
    fn test_remove_exercise_and_day() {
        let mut draft = ProgramDraft::new();
        let id = draft.add_exercise(ExerciseDraft::named("Dip")).unwrap().id.clone();
        assert!(draft.remove_exercise(&id));
        assert!(!draft.remove_exercise(&id));

        draft.set_day_name("Pull");
        draft.add_exercise(ExerciseDraft::named("Row")).unwrap();
        draft.add_day().unwrap();
        assert!(draft.remove_day(5).is_none());
        assert_eq!(draft.remove_day(0).map(|d| d.name), Some("Pull".to_string()));
        assert!(draft.days().is_empty());
    }

    #[test]
    fn test_build_requires_trimmed_name() {
        let mut draft = ProgramDraft::new();
        draft.name = "   ".into();
        assert_eq!(draft.build().unwrap_err(), DraftError::MissingProgramName);
    }

    #[test]
    fn test_build_copies_days_into_every_week_with_fresh_ids() {
        let mut draft = ProgramDraft::new();
        draft.name = " Hypertrophy ".into();
        draft.weeks = 3;
        draft.set_day_name("Legs");
        draft.add_exercise(ExerciseDraft { name: "Squat".into(), sets: 4, reps: 8, notes: String::new() })
            .unwrap();
        draft.add_day().unwrap();

        let program = draft.build().unwrap();
        assert_eq!(program.name, "Hypertrophy");
        assert_eq!(program.current_week, 1);
        assert_eq!(program.weeks.len(), 3);

        let mut ids = HashSet::new();
        assert!(ids.insert(program.id.clone()));
        for week in &program.weeks {
            assert!(ids.insert(week.id.clone()));
            assert_eq!(week.days.len(), 1);
            assert_eq!(week.days[0].name, "Legs");
            assert!(ids.insert(week.days[0].id.clone()));
            let exercise = &week.days[0].exercises[0];
            assert_eq!((exercise.sets, exercise.reps), (4, 8));
            assert!(ids.insert(exercise.id.clone()));
        }
    }

    #[test]
    fn test_build_without_days_uses_placeholders() {
        let mut draft = ProgramDraft::new();
        draft.name = "Blank".into();
        draft.weeks = 2;

        let program = draft.build().unwrap();
        assert_eq!(program.weeks.len(), 2);
        let names: Vec<&str> = program.weeks[0].days.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Day 1", "Day 2"]);
        assert!(program.weeks[0].days[0].exercises.is_empty());
    }

    #[test]
    fn test_zero_weeks_builds_one() {
        let mut draft = ProgramDraft::new();
        draft.name = "Short".into();
        draft.weeks = 0;
        assert_eq!(draft.build().unwrap().weeks.len(), 1);
    }
}
