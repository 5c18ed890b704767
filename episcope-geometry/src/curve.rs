//! Smooth curve through a chromosome's structure samples.
//!
//! Each spatial axis is an independent cubic Hermite spline parameterized by
//! genomic index, with cardinal tangents. The curve passes exactly through
//! every sample and is C¹ between them.

use crate::error::CurveError;
use episcope_data::StructureSample;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Curve fitting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Cardinal spline tension in `[0, 1]`. `0` is Catmull-Rom, `1` gives zero
    /// tangents at every knot.
    pub tension: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self { tension: 0.0 }
    }
}

/// A 1D cardinal spline over strictly increasing knots.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    tangents: Vec<f64>,
}

impl AxisSpline {
    /// Fit through `(knots[i], values[i])`. Knots must be strictly increasing
    /// and non-empty; [`CurveFit::fit_with`] checks this before calling.
    fn fit(knots: Vec<f64>, values: Vec<f64>, tension: f64) -> Self {
        let n = knots.len();
        let scale = 1.0 - tension;
        let slope = |a: usize, b: usize| (values[b] - values[a]) / (knots[b] - knots[a]);

        let tangents = (0..n)
            .map(|k| {
                if n < 2 {
                    0.0
                } else if k == 0 {
                    scale * slope(0, 1)
                } else if k == n - 1 {
                    scale * slope(n - 2, n - 1)
                } else {
                    scale * slope(k - 1, k + 1)
                }
            })
            .collect();

        Self {
            knots,
            values,
            tangents,
        }
    }

    /// Evaluate at `t`. Outside the knot range the end value is returned.
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.knots.len();
        if n == 1 {
            return self.values[0];
        }

        let t = t.clamp(self.knots[0], self.knots[n - 1]);
        let k = self
            .knots
            .partition_point(|&x| x <= t)
            .saturating_sub(1)
            .min(n - 2);

        let h = self.knots[k + 1] - self.knots[k];
        let s = (t - self.knots[k]) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * self.values[k]
            + h10 * h * self.tangents[k]
            + h01 * self.values[k + 1]
            + h11 * h * self.tangents[k + 1]
    }
}

/// Three per-axis splines over one chromosome's structure.
///
/// Immutable once fitted; share it behind an `Arc` between readers.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit {
    x: AxisSpline,
    y: AxisSpline,
    z: AxisSpline,
}

impl CurveFit {
    /// Fit with the default (Catmull-Rom) configuration.
    pub fn fit(samples: &[StructureSample]) -> Result<Self, CurveError> {
        Self::fit_with(samples, CurveConfig::default())
    }

    /// Fit through `samples`, which must be non-empty and strictly increasing
    /// in `index`. `config.tension` must lie in `[0, 1]`.
    pub fn fit_with(samples: &[StructureSample], config: CurveConfig) -> Result<Self, CurveError> {
        if !(0.0..=1.0).contains(&config.tension) {
            return Err(CurveError::InvalidTension(config.tension));
        }
        if samples.is_empty() {
            return Err(CurveError::Empty);
        }
        if let Some(position) = samples.windows(2).position(|w| w[1].index <= w[0].index) {
            return Err(CurveError::NotIncreasing {
                position: position + 1,
                previous: samples[position].index,
                current: samples[position + 1].index,
            });
        }

        let knots: Vec<f64> = samples.iter().map(|s| s.index as f64).collect();
        let axis = |f: fn(&DVec3) -> f64| {
            let values = samples.iter().map(|s| f(&s.position)).collect();
            AxisSpline::fit(knots.clone(), values, config.tension)
        };

        let curve = Self {
            x: axis(|p| p.x),
            y: axis(|p| p.y),
            z: axis(|p| p.z),
        };
        debug!(
            "Fitted curve through {} samples over [{}, {}]",
            samples.len(),
            samples[0].index,
            samples[samples.len() - 1].index
        );
        Ok(curve)
    }

    /// Position at genomic `index`, clamped to the fitted domain.
    pub fn evaluate(&self, index: f64) -> DVec3 {
        DVec3::new(
            self.x.evaluate(index),
            self.y.evaluate(index),
            self.z.evaluate(index),
        )
    }

    /// First and last fitted genomic index.
    pub fn domain(&self) -> (f64, f64) {
        let knots = &self.x.knots;
        (knots[0], knots[knots.len() - 1])
    }

    /// Fitted genomic indices (one per sample).
    pub fn knots(&self) -> &[f64] {
        &self.x.knots
    }

    pub fn len(&self) -> usize {
        self.x.knots.len()
    }

    /// Always false: a fit needs at least one sample.
    pub fn is_empty(&self) -> bool {
        self.x.knots.is_empty()
    }

    pub fn axes(&self) -> [&AxisSpline; 3] {
        [&self.x, &self.y, &self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helix(n: usize) -> Vec<StructureSample> {
        (0..n)
            .map(|i| {
                let a = i as f64 * 0.7;
                StructureSample::from_bead_id(i as i64, DVec3::new(a.cos(), a.sin(), a * 0.3))
            })
            .collect()
    }

    #[test]
    fn test_curve_passes_through_samples() {
        let samples = helix(12);
        let curve = CurveFit::fit(&samples).unwrap();
        for s in &samples {
            let p = curve.evaluate(s.index as f64);
            assert!((p - s.position).length() < 1e-9, "{:?} vs {:?}", p, s.position);
        }
    }

    #[test]
    fn test_curve_passes_through_samples_with_tension() {
        let samples = helix(6);
        let curve = CurveFit::fit_with(&samples, CurveConfig { tension: 0.5 }).unwrap();
        for s in &samples {
            assert!((curve.evaluate(s.index as f64) - s.position).length() < 1e-9);
        }
    }

    #[test]
    fn test_curve_is_smooth_across_knots() {
        let samples = helix(8);
        let curve = CurveFit::fit(&samples).unwrap();
        let eps = 1.0;
        for s in &samples[1..samples.len() - 1] {
            let t = s.index as f64;
            let left = (curve.evaluate(t) - curve.evaluate(t - eps)) / eps;
            let right = (curve.evaluate(t + eps) - curve.evaluate(t)) / eps;
            assert!((left - right).length() < 1e-6);
        }
    }

    #[test]
    fn test_collinear_samples_stay_on_line() {
        let samples: Vec<_> = (0..5)
            .map(|i| StructureSample::from_bead_id(i, DVec3::new(i as f64, 2.0 * i as f64, 0.0)))
            .collect();
        let curve = CurveFit::fit(&samples).unwrap();
        let p = curve.evaluate(250_000.0);
        assert!((p - DVec3::new(2.5, 5.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_evaluate_clamps_outside_domain() {
        let samples = helix(4);
        let curve = CurveFit::fit(&samples).unwrap();
        assert_eq!(curve.evaluate(-1.0e6), samples[0].position);
        assert_eq!(curve.evaluate(1.0e9), samples[3].position);
        assert_eq!(curve.domain(), (0.0, 300_000.0));
    }

    #[test]
    fn test_single_sample_is_constant() {
        let samples = vec![StructureSample::new(500, DVec3::new(1.0, 2.0, 3.0))];
        let curve = CurveFit::fit(&samples).unwrap();
        assert_eq!(curve.evaluate(0.0), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(curve.evaluate(1.0e6), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(curve.len(), 1);
    }

    #[test]
    fn test_tension_out_of_range_rejected() {
        let samples = helix(4);
        for tension in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                CurveFit::fit_with(&samples, CurveConfig { tension }),
                Err(CurveError::InvalidTension(_))
            ));
        }
        assert!(CurveFit::fit_with(&samples, CurveConfig { tension: 1.0 }).is_ok());
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert_eq!(CurveFit::fit(&[]).unwrap_err(), CurveError::Empty);
    }

    #[test]
    fn test_unsorted_samples_rejected() {
        let mut samples = helix(4);
        samples.swap(1, 2);
        assert_eq!(
            CurveFit::fit(&samples).unwrap_err(),
            CurveError::NotIncreasing {
                position: 2,
                previous: 200_000,
                current: 100_000
            }
        );
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let samples = vec![
            StructureSample::new(0, DVec3::ZERO),
            StructureSample::new(0, DVec3::ONE),
        ];
        assert!(matches!(
            CurveFit::fit(&samples),
            Err(CurveError::NotIncreasing { position: 1, .. })
        ));
    }
}
