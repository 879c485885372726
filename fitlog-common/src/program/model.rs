//! Workout program records
//!
//! Stored verbatim as camelCase JSON. Every field has a default so that a
//! hand-edited or older blob with missing fields still loads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutProgram {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weeks: Vec<Week>,
    /// 1-based index of the week last worked on
    pub current_week: usize,
}

impl Default for WorkoutProgram {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            weeks: Vec::new(),
            current_week: 1,
        }
    }
}

impl WorkoutProgram {
    /// Week by 1-based number
    pub fn week(&self, number: usize) -> Option<&Week> {
        number.checked_sub(1).and_then(|i| self.weeks.get(i))
    }

    pub fn week_mut(&mut self, number: usize) -> Option<&mut Week> {
        number.checked_sub(1).and_then(move |i| self.weeks.get_mut(i))
    }

    /// All exercises across every week and day
    pub fn exercises(&self) -> impl Iterator<Item = &ProgramExercise> {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .flat_map(|d| d.exercises.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Week {
    pub id: String,
    pub days: Vec<WorkoutDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutDay {
    pub id: String,
    pub name: String,
    pub exercises: Vec<ProgramExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramExercise {
    pub id: String,
    pub name: String,
    /// Number of sets
    pub sets: u32,
    pub reps: u32,
    pub notes: String,
    /// Weight per set
    pub weights: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}

impl Default for ProgramExercise {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            sets: 3,
            reps: 10,
            notes: String::new(),
            weights: Vec::new(),
            completed: None,
            completed_date: None,
        }
    }
}
