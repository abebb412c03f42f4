//! Experimental reference data
//!
//! [`ExperimentData`] carries measured series sampled at arbitrary
//! times: temperature at a sensor position and, optionally, the applied
//! boundary heat flux. The engine only ever reads it — for the final
//! error norm of a forward run, and as the measurement the inverse
//! estimator tries to reproduce.

use crate::error::EngineError;

/// Measured reference series, parallel arrays over the same time axis.
#[derive(Debug, Clone, Default)]
pub struct ExperimentData {
    /// Sample times [s], strictly increasing.
    pub t: Vec<f64>,

    /// Measured temperature at the sensor position, one per sample time.
    pub temperature: Vec<f64>,

    /// Measured boundary heat flux [W/m^2], if recorded. Either empty or
    /// one per sample time.
    pub heat_flux: Vec<f64>,
}

impl ExperimentData {
    /// Create a temperature-only record, validating the array shapes.
    pub fn new(t: Vec<f64>, temperature: Vec<f64>) -> Result<Self, EngineError> {
        Self::with_heat_flux(t, temperature, Vec::new())
    }

    /// Create a record carrying both temperature and flux series.
    pub fn with_heat_flux(
        t: Vec<f64>,
        temperature: Vec<f64>,
        heat_flux: Vec<f64>,
    ) -> Result<Self, EngineError> {
        if t.len() != temperature.len() {
            return Err(EngineError::MissingExperimentData {
                reason: format!(
                    "time and temperature lengths differ: {} vs {}",
                    t.len(),
                    temperature.len()
                ),
            });
        }
        if !heat_flux.is_empty() && heat_flux.len() != t.len() {
            return Err(EngineError::MissingExperimentData {
                reason: format!(
                    "heat flux length {} does not match time length {}",
                    heat_flux.len(),
                    t.len()
                ),
            });
        }
        if t.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EngineError::MissingExperimentData {
                reason: "sample times must be strictly increasing".into(),
            });
        }
        Ok(Self {
            t,
            temperature,
            heat_flux,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// First and last sample time, if any data exists.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((*self.t.first()?, *self.t.last()?))
    }

    /// Linearly interpolate the measured temperature at time `t`.
    ///
    /// Returns `None` outside the measured time span — extrapolating a
    /// measurement would silently fabricate data.
    pub fn temperature_at(&self, t: f64) -> Option<f64> {
        interpolate(&self.t, &self.temperature, t)
    }

    /// Linearly interpolate the measured flux at time `t`.
    pub fn heat_flux_at(&self, t: f64) -> Option<f64> {
        if self.heat_flux.is_empty() {
            return None;
        }
        interpolate(&self.t, &self.heat_flux, t)
    }
}

/// Linear interpolation of `(xs, ys)` at `x`; `None` outside the domain.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    let (&first, &last) = (xs.first()?, xs.last()?);
    if x < first || x > last {
        return None;
    }
    // partition_point gives the first index with xs[i] > x.
    let idx = xs.partition_point(|&xi| xi <= x);
    if idx == xs.len() {
        return Some(ys[ys.len() - 1]);
    }
    if idx == 0 {
        return Some(ys[0]);
    }
    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (ys[idx - 1], ys[idx]);
    let w = (x - x0) / (x1 - x0);
    Some(y0 * (1.0 - w) + y1 * w)
}

/// Root-mean-square distance between a simulated series and a measured
/// one, evaluated at the measurement sample times that fall inside the
/// simulated time range.
///
/// Returns `None` when the two series do not overlap at all — "no data"
/// must stay distinguishable from "perfect match".
pub fn rms_error(
    sim_t: &[f64],
    sim_values: &[f64],
    exp_t: &[f64],
    exp_values: &[f64],
) -> Option<f64> {
    let (&sim_first, &sim_last) = (sim_t.first()?, sim_t.last()?);

    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for (&t, &measured) in exp_t.iter().zip(exp_values) {
        if t < sim_first || t > sim_last {
            continue;
        }
        let simulated = interpolate(sim_t, sim_values, t)?;
        let diff = simulated - measured;
        sum_sq += diff * diff;
        count += 1;
    }

    if count == 0 {
        None
    } else {
        Some((sum_sq / count as f64).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = ExperimentData::new(vec![0.0, 1.0], vec![20.0]).unwrap_err();
        assert!(matches!(err, EngineError::MissingExperimentData { .. }));
    }

    #[test]
    fn non_monotonic_times_are_rejected() {
        assert!(ExperimentData::new(vec![0.0, 2.0, 1.0], vec![1.0, 2.0, 3.0]).is_err());
        assert!(ExperimentData::new(vec![0.0, 0.0], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn flux_series_interpolates_when_present_and_is_none_otherwise() {
        let recorded = ExperimentData::with_heat_flux(
            vec![0.0, 1.0, 2.0],
            vec![20.0, 21.0, 22.0],
            vec![0.0, 100.0, 200.0],
        )
        .unwrap();
        assert_eq!(recorded.heat_flux_at(0.5), Some(50.0));
        assert_eq!(recorded.heat_flux_at(2.0), Some(200.0));
        // Outside the measured span: no extrapolation.
        assert_eq!(recorded.heat_flux_at(3.0), None);

        let temperature_only = ExperimentData::new(vec![0.0, 1.0], vec![20.0, 21.0]).unwrap();
        assert_eq!(temperature_only.heat_flux_at(0.5), None);
    }

    #[test]
    fn interpolation_inside_and_outside_the_span() {
        let data = ExperimentData::new(vec![0.0, 10.0], vec![20.0, 40.0]).unwrap();
        assert!((data.temperature_at(5.0).unwrap() - 30.0).abs() < 1e-12);
        assert_eq!(data.temperature_at(-1.0), None);
        assert_eq!(data.temperature_at(10.5), None);
    }

    #[test]
    fn rms_error_over_overlap_only() {
        // Simulated: identity line. Measured: identity + 1 at three
        // points, one of which is outside the simulated range.
        let sim_t = [0.0, 1.0, 2.0];
        let sim_v = [0.0, 1.0, 2.0];
        let exp_t = [0.5, 1.5, 5.0];
        let exp_v = [1.5, 2.5, 99.0];

        let norm = rms_error(&sim_t, &sim_v, &exp_t, &exp_v).unwrap();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rms_error_without_overlap_is_none() {
        let norm = rms_error(&[0.0, 1.0], &[0.0, 1.0], &[5.0, 6.0], &[1.0, 2.0]);
        assert_eq!(norm, None);
    }
}
