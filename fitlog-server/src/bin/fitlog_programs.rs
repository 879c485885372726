//! fitlog-programs - manage workout programs in the local program store
//!
//! Programs live in `programs.json` inside the root folder and never reach
//! the server database.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use fitlog_common::config::{RootFolderInitializer, RootFolderResolver};
use fitlog_common::program::{
    ExerciseDraft, FileStore, ProgramCatalog, ProgramDraft, ProgramRepository, ProgramTracker,
    WorkoutProgram,
};
use fitlog_common::time;

#[derive(Parser, Debug)]
#[command(name = "fitlog-programs")]
#[command(about = "Create and track multi-week workout programs")]
#[command(version)]
struct Args {
    /// Folder holding programs.json
    #[arg(short, long, global = true)]
    root_folder: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved programs
    List,

    /// Show one week of a program
    Show {
        program: String,
        #[arg(short, long, default_value_t = 1)]
        week: usize,
    },

    /// Create a program
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value_t = 4)]
        weeks: usize,
        /// Day template: "Name:Exercise/sets/reps,Exercise/sets/reps" (repeatable)
        #[arg(long = "day")]
        days: Vec<String>,
    },

    /// Delete a program
    Delete { program: String },

    /// Record the weight for one set (set numbers start at 1)
    SetWeight {
        program: String,
        week: usize,
        exercise: String,
        set: usize,
        value: String,
    },

    /// Toggle completion of an exercise
    Complete {
        program: String,
        week: usize,
        exercise: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    let root_folder = RootFolderResolver::new("fitlog-programs")
        .with_cli_arg(args.root_folder)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;

    let store = FileStore::new(initializer.programs_path());
    let mut catalog = ProgramCatalog::open(ProgramRepository::new(store))
        .context("Failed to load programs")?;

    match args.command {
        Command::List => {
            if catalog.programs().is_empty() {
                println!("No programs yet.");
            }
            for program in catalog.programs() {
                println!(
                    "{}  {}  ({} weeks, on week {})",
                    program.id,
                    program.name,
                    program.weeks.len(),
                    program.current_week
                );
            }
        }
        Command::Show { program, week } => {
            let program = find(&catalog, &program)?;
            print_week(program, week)?;
        }
        Command::Create {
            name,
            description,
            weeks,
            days,
        } => {
            let mut draft = ProgramDraft::new();
            draft.name = name;
            draft.description = description;
            draft.weeks = weeks;
            for spec in &days {
                add_day_from_spec(&mut draft, spec)?;
            }
            let program = draft.build()?;
            println!("Created program {}", program.id);
            catalog.add(program)?;
        }
        Command::Delete { program } => {
            let removed = catalog.delete(&program)?;
            println!("Deleted program {}", removed.name);
        }
        Command::SetWeight {
            program,
            week,
            exercise,
            set,
            value,
        } => {
            if set == 0 {
                bail!("Set numbers start at 1");
            }
            let mut tracker = tracker_at_week(&catalog, &program, week, &exercise)?;
            tracker.set_weight(&exercise, set - 1, &value)?;
            tracker.save_weights(&mut catalog)?;
            println!("Weights saved.");
        }
        Command::Complete {
            program,
            week,
            exercise,
        } => {
            let mut tracker = tracker_at_week(&catalog, &program, week, &exercise)?;
            let done = tracker.toggle_complete(&exercise, time::now());
            tracker.save_weights(&mut catalog)?;
            println!("{}", if done { "Marked complete." } else { "Marked incomplete." });
        }
    }

    Ok(())
}

fn find<'a>(catalog: &'a ProgramCatalog<FileStore>, id: &str) -> Result<&'a WorkoutProgram> {
    catalog
        .get(id)
        .ok_or_else(|| anyhow!("No program with id {}", id))
}

fn tracker_at_week(
    catalog: &ProgramCatalog<FileStore>,
    program_id: &str,
    week: usize,
    exercise_id: &str,
) -> Result<ProgramTracker> {
    let program = find(catalog, program_id)?;
    let days = &program
        .week(week)
        .ok_or_else(|| anyhow!("Program {} has no week {}", program.name, week))?
        .days;
    if !days.iter().flat_map(|d| &d.exercises).any(|e| e.id == exercise_id) {
        bail!("Week {} has no exercise {}", week, exercise_id);
    }
    let mut tracker = ProgramTracker::select(program);
    tracker.go_to_week(week);
    Ok(tracker)
}

fn print_week(program: &WorkoutProgram, week: usize) -> Result<()> {
    let days = &program
        .week(week)
        .ok_or_else(|| anyhow!("Program {} has no week {}", program.name, week))?
        .days;

    println!("{} - week {} of {}", program.name, week, program.weeks.len());
    for day in days {
        println!("  {}", day.name);
        for exercise in &day.exercises {
            let weights: Vec<String> = exercise.weights.iter().map(|w| w.to_string()).collect();
            println!(
                "    {} {}x{} [{}]{}  ({})",
                exercise.name,
                exercise.sets,
                exercise.reps,
                weights.join(", "),
                if exercise.completed == Some(true) { " done" } else { "" },
                exercise.id
            );
        }
    }
    Ok(())
}

/// Parse `Name:Exercise/sets/reps,...` into a finished draft day
fn add_day_from_spec(draft: &mut ProgramDraft, spec: &str) -> Result<()> {
    let (day_name, exercises) = spec
        .split_once(':')
        .ok_or_else(|| anyhow!("Day '{}' must look like Name:Exercise/sets/reps", spec))?;
    draft.set_day_name(day_name.trim());

    for item in exercises.split(',').filter(|s| !s.trim().is_empty()) {
        let mut parts = item.split('/').map(str::trim);
        let mut exercise = ExerciseDraft::named(parts.next().unwrap_or_default());
        if let Some(sets) = parts.next() {
            exercise.sets = sets
                .parse()
                .with_context(|| format!("Invalid set count in '{}'", item))?;
        }
        if let Some(reps) = parts.next() {
            exercise.reps = reps
                .parse()
                .with_context(|| format!("Invalid rep count in '{}'", item))?;
        }
        draft.add_exercise(exercise)?;
    }

    draft.add_day()?;
    Ok(())
}
