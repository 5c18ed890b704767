//! Renderable polyline geometry produced by the resamplers.

use crate::curve::CurveFit;
use glam::Vec3;

/// Name under which display layers expose [`GeometryBuffer::scalars`].
pub const SCALARS_NAME: &str = "scalars";

/// Points, optional per-point scalars and polyline topology.
///
/// Every resampling call returns a freshly allocated buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    /// Point positions in structure space.
    pub points: Vec<Vec3>,
    /// One value per point, when the geometry carries track values.
    pub scalars: Option<Vec<f32>>,
    /// Point-index groups; each group is one connected polyline.
    pub lines: Vec<Vec<u32>>,
}

/// Axis-aligned bounds of a buffer's points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub center: Vec3,
    pub radius: f32,
}

impl GeometryBuffer {
    /// Evaluate `(index, value)` segments along `curve`, one polyline per
    /// segment. Values are kept only when `with_scalars` is set.
    pub(crate) fn from_segments(
        curve: &CurveFit,
        segments: &[Vec<(i64, f64)>],
        with_scalars: bool,
    ) -> Self {
        let total: usize = segments.iter().map(Vec::len).sum();
        let mut points = Vec::with_capacity(total);
        let mut scalars = with_scalars.then(|| Vec::with_capacity(total));
        let mut lines = Vec::with_capacity(segments.len());

        for segment in segments {
            let mut line = Vec::with_capacity(segment.len());
            for &(index, value) in segment {
                line.push(points.len() as u32);
                points.push(curve.evaluate(index as f64).as_vec3());
                if let Some(scalars) = scalars.as_mut() {
                    scalars.push(value as f32);
                }
            }
            lines.push(line);
        }

        Self {
            points,
            scalars,
            lines,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Raw point data for upload into a vertex buffer.
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Minimum and maximum scalar, if the buffer has any scalars.
    pub fn scalar_range(&self) -> Option<(f32, f32)> {
        let scalars = self.scalars.as_ref()?;
        scalars.iter().fold(None, |range, &v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Flattened topology: `[n, id_0, .., id_n-1, n, ..]` per polyline.
    pub fn cell_array(&self) -> Vec<u32> {
        let mut cells = Vec::with_capacity(self.lines.len() + self.points.len());
        for line in &self.lines {
            cells.push(line.len() as u32);
            cells.extend_from_slice(line);
        }
        cells
    }

    /// Bounds of all points, or `None` for an empty buffer.
    pub fn bounds(&self) -> Option<GeometryBounds> {
        let first = *self.points.first()?;
        let (min, max) = self
            .points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));

        Some(GeometryBounds {
            min,
            max,
            center: (min + max) * 0.5,
            radius: (max - min).length() * 0.5,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> GeometryBuffer {
        GeometryBuffer {
            points: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 4.0, 0.0),
            ],
            scalars: Some(vec![0.0, 5.0, -1.0]),
            lines: vec![vec![0, 1], vec![2]],
        }
    }

    #[test]
    fn test_cell_array() {
        assert_eq!(buffer().cell_array(), vec![2, 0, 1, 1, 2]);
    }

    #[test]
    fn test_scalar_range() {
        assert_eq!(buffer().scalar_range(), Some((-1.0, 5.0)));
        assert_eq!(GeometryBuffer::default().scalar_range(), None);
    }

    #[test]
    fn test_bounds() {
        let bounds = buffer().bounds().unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(2.0, 4.0, 0.0));
        assert_eq!(bounds.center, Vec3::new(1.0, 2.0, 0.0));
        assert!(GeometryBuffer::default().bounds().is_none());
    }

    #[test]
    fn test_positions_bytes_length() {
        assert_eq!(buffer().positions_bytes().len(), 3 * 3 * 4);
    }
}
