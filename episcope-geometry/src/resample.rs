//! Resampling of structures and tracks along a fitted curve.
//!
//! `max_distance` is a step in genomic coordinates; `<= 0` disables
//! subdivision and only the raw anchor points are emitted.

use crate::buffer::GeometryBuffer;
use crate::curve::CurveFit;
use episcope_data::{PeakTrackPoint, PointTrackPoint};
use std::fmt;
use tracing::debug;

/// What to resample. Each variant maps to one resampling function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResampleRequest<'a> {
    /// Genomic indices to place along the curve, usually the structure's own.
    Structure(&'a [i64]),
    PeakTrack(&'a [PeakTrackPoint]),
    PointTrack(&'a [PointTrackPoint]),
}

impl ResampleRequest<'_> {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Structure(_) => GeometryKind::Structure,
            Self::PeakTrack(_) => GeometryKind::PeakTrack,
            Self::PointTrack(_) => GeometryKind::PointTrack,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Structure,
    PeakTrack,
    PointTrack,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Structure => "structure",
            Self::PeakTrack => "peak",
            Self::PointTrack => "point",
        })
    }
}

/// Dispatch a request to its resampling function.
pub fn resample(curve: &CurveFit, request: &ResampleRequest<'_>, max_distance: i64) -> GeometryBuffer {
    match *request {
        ResampleRequest::Structure(indices) => resample_structure(curve, indices, max_distance),
        ResampleRequest::PeakTrack(peaks) => resample_peak_track(curve, peaks, max_distance),
        ResampleRequest::PointTrack(intervals) => resample_point_track(curve, intervals, max_distance),
    }
}

/// One polyline through `indices`, subdivided every `max_distance`.
///
/// Each consecutive pair `(a, b)` contributes `a, a + d, ..` below `b`; the
/// last index closes the line. No scalars are attached.
pub fn resample_structure(curve: &CurveFit, indices: &[i64], max_distance: i64) -> GeometryBuffer {
    let walk: Vec<(i64, f64)> = if max_distance <= 0 || indices.len() < 2 {
        indices.iter().map(|&i| (i, 0.0)).collect()
    } else {
        let mut walk = Vec::new();
        for pair in indices.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            walk.extend(steps(a, b, max_distance).map(|i| (i, 0.0)));
        }
        if let Some(&last) = indices.last() {
            walk.push((last, 0.0));
        }
        walk
    };

    let segments = if walk.is_empty() { Vec::new() } else { vec![walk] };
    let buffer = GeometryBuffer::from_segments(curve, &segments, false);
    debug!(
        "Resampled structure: {} indices -> {} points (max_distance {})",
        indices.len(),
        buffer.len(),
        max_distance
    );
    buffer
}

/// A triangular profile per peak: `start` and `end` at zero, `summit` at the
/// peak value. Each peak is its own polyline.
///
/// Peaks are never subdivided; `max_distance` is accepted for symmetry with
/// the other resamplers.
pub fn resample_peak_track(
    curve: &CurveFit,
    peaks: &[PeakTrackPoint],
    max_distance: i64,
) -> GeometryBuffer {
    let segments: Vec<Vec<(i64, f64)>> = peaks
        .iter()
        .map(|p| vec![(p.start, 0.0), (p.summit, p.value), (p.end, 0.0)])
        .collect();

    let buffer = GeometryBuffer::from_segments(curve, &segments, true);
    debug!(
        "Resampled peak track: {} peaks -> {} points (max_distance {} ignored)",
        peaks.len(),
        buffer.len(),
        max_distance
    );
    buffer
}

/// A flat step per interval at the interval's value, subdivided every
/// `max_distance`. The interval end is always emitted.
pub fn resample_point_track(
    curve: &CurveFit,
    intervals: &[PointTrackPoint],
    max_distance: i64,
) -> GeometryBuffer {
    let segments: Vec<Vec<(i64, f64)>> = intervals
        .iter()
        .map(|p| {
            if max_distance <= 0 {
                vec![(p.start, p.value), (p.end, p.value)]
            } else {
                steps(p.start, p.end, max_distance)
                    .chain(std::iter::once(p.end))
                    .map(|i| (i, p.value))
                    .collect()
            }
        })
        .collect();

    let buffer = GeometryBuffer::from_segments(curve, &segments, true);
    debug!(
        "Resampled point track: {} intervals -> {} points (max_distance {})",
        intervals.len(),
        buffer.len(),
        max_distance
    );
    buffer
}

/// `start, start + step, ..` while strictly below `end`. `step` must be positive.
fn steps(start: i64, end: i64, step: i64) -> impl Iterator<Item = i64> {
    std::iter::successors(Some(start), move |&i| i.checked_add(step)).take_while(move |&i| i < end)
}
