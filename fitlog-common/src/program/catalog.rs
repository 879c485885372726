//! In-memory program collection backed by a [`ProgramRepository`]
//!
//! Every mutation writes the complete collection back to the store.

use crate::program::model::WorkoutProgram;
use crate::program::store::{ProgramRepository, ProgramStore};
use crate::{Error, Result};
use tracing::info;

pub struct ProgramCatalog<S: ProgramStore> {
    repository: ProgramRepository<S>,
    programs: Vec<WorkoutProgram>,
}

impl<S: ProgramStore> ProgramCatalog<S> {
    /// Load the saved collection
    pub fn open(repository: ProgramRepository<S>) -> Result<Self> {
        let programs = repository.load()?;
        Ok(Self {
            repository,
            programs,
        })
    }

    pub fn programs(&self) -> &[WorkoutProgram] {
        &self.programs
    }

    pub fn get(&self, id: &str) -> Option<&WorkoutProgram> {
        self.programs.iter().find(|p| p.id == id)
    }

    /// Append a program and persist
    pub fn add(&mut self, program: WorkoutProgram) -> Result<()> {
        info!("Adding workout program {} ({})", program.name, program.id);
        self.programs.push(program);
        self.persist()
    }

    /// Remove a program and persist
    pub fn delete(&mut self, id: &str) -> Result<WorkoutProgram> {
        let index = self
            .programs
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Program {}", id)))?;
        let removed = self.programs.remove(index);
        self.persist()?;
        info!("Deleted workout program {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Swap in an updated copy of an existing program and persist
    pub fn replace(&mut self, program: WorkoutProgram) -> Result<()> {
        let slot = self
            .programs
            .iter_mut()
            .find(|p| p.id == program.id)
            .ok_or_else(|| Error::NotFound(format!("Program {}", program.id)))?;
        *slot = program;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.repository.save(&self.programs)
    }
}
