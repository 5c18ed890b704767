//! Episcope Data Crate
//!
//! Loading of chromatin structure ensembles: the `meta.yaml` hierarchy
//! (ensemble -> experiment -> timestep), per-chromosome structure samples and
//! the peak/point tracks attached to each timestep.
//! This crate is display-agnostic and only produces plain, immutable data.

pub mod dataset;
pub mod error;
pub mod meta;
pub mod source;
pub mod tracks;
pub mod types;

pub use dataset::{Ensemble, Experiment, Timestep};
pub use error::DatasetError;
pub use source::{Selection, SourceProvider};
pub use types::{PeakTrackPoint, PointTrackPoint, STRUCTURE_INDEX_SCALE, StructureSample};
