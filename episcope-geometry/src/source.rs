use crate::buffer::GeometryBuffer;
use crate::curve::CurveFit;
use crate::error::PreconditionError;
use crate::resample::{self, ResampleRequest};
use std::sync::Arc;

/// Resampling entry point bound to a (possibly missing) curve fit.
///
/// Setting a curve produces a new source; existing sources keep theirs.
#[derive(Debug, Clone, Default)]
pub struct GeometrySource {
    curve: Option<Arc<CurveFit>>,
}

impl GeometrySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_curve(&self, curve: Arc<CurveFit>) -> Self {
        Self { curve: Some(curve) }
    }

    pub fn curve(&self) -> Option<&Arc<CurveFit>> {
        self.curve.as_ref()
    }

    pub fn resample(
        &self,
        request: &ResampleRequest<'_>,
        max_distance: i64,
    ) -> Result<GeometryBuffer, PreconditionError> {
        let curve = self.curve.as_deref().ok_or(PreconditionError::CurveNotSet)?;
        Ok(resample::resample(curve, request, max_distance))
    }
}
