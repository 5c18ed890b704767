//! Episcope Geometry Crate
//!
//! Smooth curves through chromatin structures and resampling of structures
//! and genomic tracks into renderable polylines.
//! Everything here is pure: a fit or a buffer never changes once produced.

pub mod buffer;
pub mod curve;
pub mod error;
pub mod resample;
pub mod selection;
pub mod source;

pub use buffer::{GeometryBounds, GeometryBuffer, SCALARS_NAME};
pub use curve::{AxisSpline, CurveConfig, CurveFit};
pub use error::{CurveError, PreconditionError, SelectionError};
pub use resample::{
    GeometryKind, ResampleRequest, resample, resample_peak_track, resample_point_track,
    resample_structure,
};
pub use selection::SelectionGeometry;
pub use source::GeometrySource;
