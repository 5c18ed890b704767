//! Geometry for one (chromosome, experiment, timestep) selection.

use crate::buffer::GeometryBuffer;
use crate::curve::{CurveConfig, CurveFit};
use crate::error::SelectionError;
use crate::resample::ResampleRequest;
use crate::source::GeometrySource;
use episcope_data::{Selection, SourceProvider};
use std::sync::Arc;
use tracing::{debug, instrument};

/// A fitted selection that resamples its structure and tracks on demand.
///
/// Holds a borrow of the provider, so tracks are read straight from the
/// loaded dataset. Changing the selection means building a new value.
pub struct SelectionGeometry<'a, P: SourceProvider + ?Sized> {
    provider: &'a P,
    selection: Selection,
    curve: Arc<CurveFit>,
    source: GeometrySource,
    indices: Vec<i64>,
}

impl<'a, P: SourceProvider + ?Sized> SelectionGeometry<'a, P> {
    pub fn new(provider: &'a P, selection: Selection) -> Result<Self, SelectionError> {
        Self::with_config(provider, selection, CurveConfig::default())
    }

    /// Look up the selection's structure and fit its curve.
    #[instrument(skip_all, fields(selection = %selection))]
    pub fn with_config(
        provider: &'a P,
        selection: Selection,
        config: CurveConfig,
    ) -> Result<Self, SelectionError> {
        let samples = provider
            .structure(&selection.chromosome, &selection.experiment, &selection.timestep)
            .ok_or_else(|| SelectionError::UnknownSelection(selection.clone()))?;

        let curve = Arc::new(CurveFit::fit_with(samples, config)?);
        let indices = samples.iter().map(|s| s.index).collect();
        debug!("Selection fitted with {} samples", samples.len());

        Ok(Self {
            provider,
            selection,
            source: GeometrySource::new().with_curve(Arc::clone(&curve)),
            curve,
            indices,
        })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The fitted curve, shared with every buffer produced from it.
    pub fn curve(&self) -> Arc<CurveFit> {
        Arc::clone(&self.curve)
    }

    /// Genomic indices of the structure samples.
    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    pub fn resample(
        &self,
        request: &ResampleRequest<'_>,
        max_distance: i64,
    ) -> Result<GeometryBuffer, SelectionError> {
        Ok(self.source.resample(request, max_distance)?)
    }

    /// The structure polyline over its own indices.
    pub fn structure(&self, max_distance: i64) -> Result<GeometryBuffer, SelectionError> {
        self.resample(&ResampleRequest::Structure(&self.indices), max_distance)
    }

    pub fn peak_track(&self, name: &str, max_distance: i64) -> Result<GeometryBuffer, SelectionError> {
        let s = &self.selection;
        let peaks = self
            .provider
            .peak_track(&s.chromosome, &s.experiment, &s.timestep, name)
            .ok_or_else(|| self.unknown_track("peak", name))?;
        self.resample(&ResampleRequest::PeakTrack(peaks), max_distance)
    }

    pub fn point_track(&self, name: &str, max_distance: i64) -> Result<GeometryBuffer, SelectionError> {
        let s = &self.selection;
        let points = self
            .provider
            .point_track(&s.chromosome, &s.experiment, &s.timestep, name)
            .ok_or_else(|| self.unknown_track("point", name))?;
        self.resample(&ResampleRequest::PointTrack(points), max_distance)
    }

    fn unknown_track(&self, kind: &'static str, name: &str) -> SelectionError {
        SelectionError::UnknownTrack {
            kind,
            track: name.to_string(),
            selection: self.selection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use episcope_data::{PeakTrackPoint, PointTrackPoint, StructureSample};
    use glam::DVec3;
    use std::collections::BTreeSet;

    /// One chromosome "chr1" in "exp"/"t0" along the x axis.
    struct Fixed {
        structure: Vec<StructureSample>,
        peaks: Vec<PeakTrackPoint>,
        points: Vec<PointTrackPoint>,
    }

    impl Fixed {
        fn new(structure: Vec<StructureSample>) -> Self {
            Self {
                structure,
                peaks: vec![PeakTrackPoint::new(10_000, 30_000, 20_000, 4.0)],
                points: vec![PointTrackPoint::new(0, 100_000, 1.5)],
            }
        }

        fn matches(c: &str, e: &str, t: &str) -> bool {
            (c, e, t) == ("chr1", "exp", "t0")
        }
    }

    impl SourceProvider for Fixed {
        fn chromosome_names(&self, _: Option<&str>, _: Option<&str>) -> BTreeSet<String> {
            BTreeSet::from(["chr1".to_string()])
        }

        fn experiment_names(&self, _: Option<&str>, _: Option<&str>) -> BTreeSet<String> {
            BTreeSet::from(["exp".to_string()])
        }

        fn timestep_names(&self, _: Option<&str>, _: Option<&str>) -> BTreeSet<String> {
            BTreeSet::from(["t0".to_string()])
        }

        fn peak_track_names(&self, _: &str, _: &str, _: &str) -> BTreeSet<String> {
            BTreeSet::from(["atac".to_string()])
        }

        fn point_track_names(&self, _: &str, _: &str, _: &str) -> BTreeSet<String> {
            BTreeSet::from(["compartment".to_string()])
        }

        fn structure(&self, c: &str, e: &str, t: &str) -> Option<&[StructureSample]> {
            Self::matches(c, e, t).then_some(self.structure.as_slice())
        }

        fn peak_track(&self, c: &str, e: &str, t: &str, track: &str) -> Option<&[PeakTrackPoint]> {
            (Self::matches(c, e, t) && track == "atac").then_some(self.peaks.as_slice())
        }

        fn point_track(&self, c: &str, e: &str, t: &str, track: &str) -> Option<&[PointTrackPoint]> {
            (Self::matches(c, e, t) && track == "compartment").then_some(self.points.as_slice())
        }
    }

    fn line(n: i64) -> Vec<StructureSample> {
        (0..n)
            .map(|i| StructureSample::from_bead_id(i, DVec3::new(i as f64, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_structure_and_tracks() {
        let provider = Fixed::new(line(3));
        let geometry = SelectionGeometry::new(&provider, Selection::new("chr1", "exp", "t0")).unwrap();

        assert_eq!(geometry.indices(), &[0, 100_000, 200_000]);
        assert_eq!(geometry.structure(0).unwrap().len(), 3);
        assert_eq!(geometry.structure(50_000).unwrap().len(), 5);

        let peaks = geometry.peak_track("atac", 0).unwrap();
        assert_eq!(peaks.scalars, Some(vec![0.0, 4.0, 0.0]));

        let points = geometry.point_track("compartment", 25_000).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(geometry.curve().len(), 3);
    }

    #[test]
    fn test_unknown_selection() {
        let provider = Fixed::new(line(3));
        let result = SelectionGeometry::new(&provider, Selection::new("chr9", "exp", "t0"));
        assert!(matches!(result, Err(SelectionError::UnknownSelection(_))));
    }

    #[test]
    fn test_unknown_track() {
        let provider = Fixed::new(line(3));
        let geometry = SelectionGeometry::new(&provider, Selection::new("chr1", "exp", "t0")).unwrap();
        let err = geometry.point_track("atac", 0).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownTrack { kind: "point", .. }));
        assert_eq!(err.to_string(), "no point track 'atac' for exp/t0/chr1");
    }

    #[test]
    fn test_empty_structure_fails_to_fit() {
        let provider = Fixed::new(Vec::new());
        let result = SelectionGeometry::new(&provider, Selection::new("chr1", "exp", "t0"));
        assert!(matches!(result, Err(SelectionError::Curve(CurveError::Empty))));
    }
}
