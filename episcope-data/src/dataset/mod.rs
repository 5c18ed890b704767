//! The ensemble -> experiment -> timestep hierarchy.

mod ensemble;
mod experiment;
mod timestep;

pub use ensemble::{AUTOSOMES_SUFFIX, EXPERIMENTS_DIR, Ensemble};
pub use experiment::Experiment;
pub use timestep::{ChromosomeTrack, Timestep};
