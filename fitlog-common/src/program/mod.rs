//! Workout programs
//!
//! Multi-week program templates with per-set weight tracking. Programs never
//! touch the server database: they live in a local key-value store owned by
//! the client, saved as one JSON blob.

pub mod catalog;
pub mod editor;
pub mod model;
pub mod store;
pub mod tracker;

pub use catalog::ProgramCatalog;
pub use editor::{DraftError, ExerciseDraft, ProgramDraft};
pub use model::{ProgramExercise, Week, WorkoutDay, WorkoutProgram};
pub use store::{FileStore, MemoryStore, ProgramRepository, ProgramStore, PROGRAMS_KEY};
pub use tracker::ProgramTracker;
