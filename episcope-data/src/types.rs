//! Core track data types: structure samples, peak intervals and point intervals.
//!
//! These are plain values produced by the loader and consumed by the geometry
//! crate. Coordinates are genomic base positions; positions are in the
//! structure's own (arbitrary) 3D units.

use glam::DVec3;
use serde::Serialize;

/// Genomic distance between two consecutive structure beads.
///
/// The structure file stores bead ids; the genomic index of a bead is its id
/// scaled by this factor.
pub const STRUCTURE_INDEX_SCALE: i64 = 100_000;

/// One chromatin bead: a 3D position at a genomic index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StructureSample {
    /// Genomic coordinate of the bead.
    pub index: i64,
    /// Bead position in structure space.
    pub position: DVec3,
}

impl StructureSample {
    pub fn new(index: i64, position: DVec3) -> Self {
        Self { index, position }
    }

    /// Build a sample from a raw bead id, applying [`STRUCTURE_INDEX_SCALE`].
    ///
    /// Panics if the scaled index overflows; see [`Self::try_from_bead_id`].
    pub fn from_bead_id(id: i64, position: DVec3) -> Self {
        Self {
            index: id * STRUCTURE_INDEX_SCALE,
            position,
        }
    }

    /// Like [`Self::from_bead_id`], but `None` when the scaled index does not
    /// fit in an `i64`.
    pub fn try_from_bead_id(id: i64, position: DVec3) -> Option<Self> {
        Some(Self {
            index: id.checked_mul(STRUCTURE_INDEX_SCALE)?,
            position,
        })
    }
}

/// A single called peak of a peak track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakTrackPoint {
    pub start: i64,
    pub end: i64,
    /// Absolute coordinate of the peak summit (`start + offset`).
    pub summit: i64,
    /// Peak signal value.
    pub value: f64,
}

impl PeakTrackPoint {
    pub fn new(start: i64, end: i64, summit: i64, value: f64) -> Self {
        Self {
            start,
            end,
            summit,
            value,
        }
    }

    /// Interval width. Negative for inverted intervals.
    pub fn width(&self) -> i64 {
        self.end - self.start
    }
}

/// A constant-valued interval of a point track (e.g. a compartment call).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointTrackPoint {
    pub start: i64,
    pub end: i64,
    pub value: f64,
}

impl PointTrackPoint {
    pub fn new(start: i64, end: i64, value: f64) -> Self {
        Self { start, end, value }
    }

    /// Interval width. Negative for inverted intervals.
    pub fn width(&self) -> i64 {
        self.end - self.start
    }
}
