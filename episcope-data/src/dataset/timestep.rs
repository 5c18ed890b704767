//! A single timestep: one structure plus its named tracks.

use crate::error::{DatasetError, Result};
use crate::meta::{TimestepMeta, read_meta};
use crate::tracks::{read_peak_track, read_point_track, read_structure};
use crate::types::{PeakTrackPoint, PointTrackPoint, StructureSample};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-chromosome rows of one track.
pub type ChromosomeTrack<T> = BTreeMap<String, Vec<T>>;

/// A timestep directory, fully loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestep {
    name: String,
    path: PathBuf,
    meta: TimestepMeta,
    structures: BTreeMap<String, Vec<StructureSample>>,
    peak_tracks: BTreeMap<String, ChromosomeTrack<PeakTrackPoint>>,
    point_tracks: BTreeMap<String, ChromosomeTrack<PointTrackPoint>>,
}

impl Timestep {
    /// Load the timestep rooted at `path`. The directory name is the timestep name.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(DatasetError::not_found("timestep directory", path));
        }

        let meta: TimestepMeta = read_meta(path, "timestep meta.yaml")?;
        let structures = read_structure(&path.join(&meta.structure))?;

        let mut peak_tracks = BTreeMap::new();
        for (name, file) in &meta.tracks.peak {
            peak_tracks.insert(name.clone(), read_peak_track(&path.join(file))?);
        }

        let mut point_tracks = BTreeMap::new();
        for (name, file) in &meta.tracks.point {
            point_tracks.insert(name.clone(), read_point_track(&path.join(file))?);
        }

        debug!(
            "Loaded timestep {}: {} chromosomes, {} peak tracks, {} point tracks",
            path.display(),
            structures.len(),
            peak_tracks.len(),
            point_tracks.len()
        );

        Ok(Self {
            name: dir_name(path),
            path: path.to_path_buf(),
            meta,
            structures,
            peak_tracks,
            point_tracks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meta(&self) -> &TimestepMeta {
        &self.meta
    }

    /// All structures, keyed by chromosome.
    pub fn structures(&self) -> &BTreeMap<String, Vec<StructureSample>> {
        &self.structures
    }

    pub fn structure(&self, chromosome: &str) -> Option<&[StructureSample]> {
        self.structures.get(chromosome).map(Vec::as_slice)
    }

    /// All peak tracks, keyed by track name then chromosome.
    pub fn peak_tracks(&self) -> &BTreeMap<String, ChromosomeTrack<PeakTrackPoint>> {
        &self.peak_tracks
    }

    pub fn peak_track(&self, track: &str, chromosome: &str) -> Option<&[PeakTrackPoint]> {
        self.peak_tracks
            .get(track)
            .and_then(|t| t.get(chromosome))
            .map(Vec::as_slice)
    }

    /// All point tracks, keyed by track name then chromosome.
    pub fn point_tracks(&self) -> &BTreeMap<String, ChromosomeTrack<PointTrackPoint>> {
        &self.point_tracks
    }

    pub fn point_track(&self, track: &str, chromosome: &str) -> Option<&[PointTrackPoint]> {
        self.point_tracks
            .get(track)
            .and_then(|t| t.get(chromosome))
            .map(Vec::as_slice)
    }
}

/// Final path component as an owned string.
pub(crate) fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immediate subdirectories of `dir`, sorted by name.
pub(crate) fn subdirectories(dir: &Path, what: &'static str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DatasetError::io(what, dir, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DatasetError::io(what, dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
