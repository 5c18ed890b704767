//! Read-only query surface over a loaded dataset.
//!
//! Display and UI layers only talk to a [`SourceProvider`]; they never walk
//! the ensemble hierarchy themselves.

use crate::dataset::{Ensemble, Timestep};
use crate::types::{PeakTrackPoint, PointTrackPoint, StructureSample};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One (chromosome, experiment, timestep) choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Selection {
    pub chromosome: String,
    pub experiment: String,
    pub timestep: String,
}

impl Selection {
    pub fn new(
        chromosome: impl Into<String>,
        experiment: impl Into<String>,
        timestep: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            experiment: experiment.into(),
            timestep: timestep.into(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.experiment, self.timestep, self.chromosome)
    }
}

/// Queries over chromosomes, experiments, timesteps and their tracks.
///
/// The `Option` filters narrow a listing to entries that co-occur with the
/// given values; `None` means "any".
pub trait SourceProvider {
    /// Chromosomes with structure data.
    fn chromosome_names(&self, experiment: Option<&str>, timestep: Option<&str>) -> BTreeSet<String>;

    fn experiment_names(&self, chromosome: Option<&str>, timestep: Option<&str>) -> BTreeSet<String>;

    fn timestep_names(&self, chromosome: Option<&str>, experiment: Option<&str>) -> BTreeSet<String>;

    /// Peak tracks holding rows for `chromosome` in the given timestep.
    fn peak_track_names(&self, chromosome: &str, experiment: &str, timestep: &str) -> BTreeSet<String>;

    /// Point tracks holding rows for `chromosome` in the given timestep.
    fn point_track_names(&self, chromosome: &str, experiment: &str, timestep: &str) -> BTreeSet<String>;

    fn structure(
        &self,
        chromosome: &str,
        experiment: &str,
        timestep: &str,
    ) -> Option<&[StructureSample]>;

    fn peak_track(
        &self,
        chromosome: &str,
        experiment: &str,
        timestep: &str,
        track: &str,
    ) -> Option<&[PeakTrackPoint]>;

    fn point_track(
        &self,
        chromosome: &str,
        experiment: &str,
        timestep: &str,
        track: &str,
    ) -> Option<&[PointTrackPoint]>;
}

impl Ensemble {
    /// Every (experiment, timestep) pair passing the filters.
    fn matching_timesteps<'a>(
        &'a self,
        experiment: Option<&'a str>,
        timestep: Option<&'a str>,
    ) -> impl Iterator<Item = (&'a str, &'a Timestep)> + 'a {
        self.experiments()
            .iter()
            .filter(move |(name, _)| experiment.is_none_or(|e| e == name.as_str()))
            .flat_map(move |(name, exp)| {
                exp.timesteps()
                    .iter()
                    .filter(move |(ts, _)| timestep.is_none_or(|t| t == ts.as_str()))
                    .map(move |(_, ts)| (name.as_str(), ts))
            })
    }

    fn find_timestep(&self, experiment: &str, timestep: &str) -> Option<&Timestep> {
        self.experiment(experiment)?.timestep(timestep)
    }
}

fn has_chromosome(timestep: &Timestep, chromosome: Option<&str>) -> bool {
    chromosome.is_none_or(|c| timestep.structures().contains_key(c))
}

impl SourceProvider for Ensemble {
    fn chromosome_names(&self, experiment: Option<&str>, timestep: Option<&str>) -> BTreeSet<String> {
        self.matching_timesteps(experiment, timestep)
            .flat_map(|(_, ts)| ts.structures().keys().cloned())
            .collect()
    }

    fn experiment_names(&self, chromosome: Option<&str>, timestep: Option<&str>) -> BTreeSet<String> {
        self.matching_timesteps(None, timestep)
            .filter(|(_, ts)| has_chromosome(ts, chromosome))
            .map(|(exp, _)| exp.to_string())
            .collect()
    }

    fn timestep_names(&self, chromosome: Option<&str>, experiment: Option<&str>) -> BTreeSet<String> {
        self.matching_timesteps(experiment, None)
            .filter(|(_, ts)| has_chromosome(ts, chromosome))
            .map(|(_, ts)| ts.name().to_string())
            .collect()
    }

    fn peak_track_names(&self, chromosome: &str, experiment: &str, timestep: &str) -> BTreeSet<String> {
        self.find_timestep(experiment, timestep)
            .map(|ts| {
                ts.peak_tracks()
                    .iter()
                    .filter(|(_, track)| track.contains_key(chromosome))
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn point_track_names(&self, chromosome: &str, experiment: &str, timestep: &str) -> BTreeSet<String> {
        self.find_timestep(experiment, timestep)
            .map(|ts| {
                ts.point_tracks()
                    .iter()
                    .filter(|(_, track)| track.contains_key(chromosome))
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn structure(
        &self,
        chromosome: &str,
        experiment: &str,
        timestep: &str,
    ) -> Option<&[StructureSample]> {
        self.find_timestep(experiment, timestep)?.structure(chromosome)
    }

    fn peak_track(
        &self,
        chromosome: &str,
        experiment: &str,
        timestep: &str,
        track: &str,
    ) -> Option<&[PeakTrackPoint]> {
        self.find_timestep(experiment, timestep)?
            .peak_track(track, chromosome)
    }

    fn point_track(
        &self,
        chromosome: &str,
        experiment: &str,
        timestep: &str,
        track: &str,
    ) -> Option<&[PointTrackPoint]> {
        self.find_timestep(experiment, timestep)?
            .point_track(track, chromosome)
    }
}
