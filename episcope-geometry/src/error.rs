//! Error types for curve fitting and resampling.

use episcope_data::Selection;
use thiserror::Error;

/// A structure that cannot be fitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("cannot fit a curve through zero samples")]
    Empty,

    #[error("spline tension must lie in [0, 1], got {0}")]
    InvalidTension(f64),

    #[error(
        "structure indices must be strictly increasing: sample {position} has index {current} after {previous}"
    )]
    NotIncreasing {
        position: usize,
        previous: i64,
        current: i64,
    },
}

/// A resampling call made before its inputs were set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("a curve fit must be set before resampling")]
    CurveNotSet,
}

/// Errors resolving a selection into geometry.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no structure for {0}")]
    UnknownSelection(Selection),

    #[error("no {kind} track '{track}' for {selection}")]
    UnknownTrack {
        kind: &'static str,
        track: String,
        selection: Selection,
    },

    #[error("curve fit error: {0}")]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}
