//! Inverse heat-flux reconstruction
//!
//! # Sequential function specification
//!
//! Given temperatures measured at a known sensor position, reconstruct
//! the unknown boundary heat flux that produced them, one value per time
//! step. The method slides a short look-ahead window over the
//! measurement record:
//!
//! 1. Guess a flux (first window: `q_init`; afterwards the last accepted
//!    flux plus `init_q_adjustment`).
//! 2. Run a speculative forward burst of `window_span` steps with the
//!    guess held constant, starting from the last accepted field.
//! 3. Compare the simulated sensor temperature at the window *end*
//!    against the measurement interpolated at that time.
//! 4. Within tolerance: accept the guess for the *first* step of the
//!    window, commit that one step, discard the rest of the burst, and
//!    slide the window forward by one step.
//! 5. Otherwise adjust the guess and rerun from 2, up to a bounded
//!    iteration budget.
//!
//! The window never rewinds; each acceptance commits exactly one flux
//! value and one temperature field.
//!
//! # Adjustment law
//!
//! More flux through the left face always means a warmer sensor, so the
//! residual is monotone in the guess. The search exploits that with a
//! damped directed march: the first rejected iteration orients the step
//! against the sign of the residual, then the guess moves by a fixed
//! step until the residual changes sign; every sign change multiplies
//! the step by `adjusting_value` (negative, below 1 in magnitude), which
//! reverses the direction and shrinks the bracket geometrically, like a
//! bisection that never evaluates the midpoint.

use std::fmt;
use std::sync::Arc;

use nalgebra::DVector;

use crate::config::{Config, InverseConfig};
use crate::error::EngineError;
use crate::physics::{rms_error, Boundary, BoundaryFn, ExperimentData, Material, Mesh};
use crate::solver::assembly::assemble;
use crate::solver::state::SimulationState;
use crate::solver::step::{evaluate_step, ThetaScheme};
use crate::solver::traits::Simulation;
use crate::solver::tridiagonal::Tridiagonal;

/// Inverse boundary-flux reconstruction.
pub struct InverseSimulation {
    mesh: Mesh,
    mass: Tridiagonal,
    stiffness: Tridiagonal,
    ambient: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    robin_alpha: f64,
    scheme: ThetaScheme,
    inverse: InverseConfig,
    measurement: ExperimentData,
    sensor_position: f64,
    /// Steps whose full look-ahead window fits the measurement record.
    total_steps: usize,
    state: SimulationState,
    last_flux: f64,
}

impl InverseSimulation {
    /// Build an inverse run over `measurement`, which must carry the
    /// sensor temperature series. The run starts at the first
    /// measurement time with a uniform field at the first measured
    /// temperature.
    pub fn new(
        config: &Config,
        inverse: &InverseConfig,
        material: &Material,
        ambient: BoundaryFn,
        measurement: ExperimentData,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        inverse.validate()?;
        if measurement.is_empty() {
            return Err(EngineError::MissingExperimentData {
                reason: "inverse reconstruction needs a measured temperature series".into(),
            });
        }

        let mesh = Mesh::new(config.length, config.number_of_elements)?;
        let (mass, stiffness) = assemble(&mesh, material)?;
        let scheme = ThetaScheme::new(config.dt, config.theta)?;

        let (t_first, t_last) = measurement.time_span().expect("measurement is non-empty");
        let horizon_steps = ((t_last - t_first) / config.dt).floor() as usize;
        if horizon_steps < inverse.window_span {
            return Err(EngineError::MissingExperimentData {
                reason: format!(
                    "measurement spans {} steps of dt={}, shorter than one window of {}",
                    horizon_steps, config.dt, inverse.window_span
                ),
            });
        }
        let total_steps = horizon_steps - inverse.window_span + 1;

        let initial_temperature = measurement.temperature[0];
        let state = SimulationState::new(
            &mesh,
            config.place_of_interest,
            t_first,
            initial_temperature,
            inverse.q_init,
        );

        Ok(Self {
            mesh,
            mass,
            stiffness,
            ambient: Arc::from(ambient),
            robin_alpha: config.robin_alpha,
            scheme,
            inverse: *inverse,
            measurement,
            sensor_position: config.place_of_interest,
            total_steps,
            state,
            last_flux: inverse.q_init,
        })
    }

    /// Boundary for one speculative burst: the guess held constant, the
    /// known ambient function unchanged.
    fn window_boundary(&self, flux: f64) -> Boundary {
        let ambient = Arc::clone(&self.ambient);
        Boundary::new(
            Box::new(move |_| flux),
            Box::new(move |t| ambient(t)),
            self.robin_alpha,
        )
    }

    /// Run `window_span` steps with a constant flux; returns the field
    /// after the first step and the sensor temperature at the window
    /// end.
    fn run_window(
        &self,
        flux: f64,
        step: usize,
    ) -> Result<(DVector<f64>, f64), EngineError> {
        let boundary = self.window_boundary(flux);
        let mut field = self.state.temperature().clone();
        let mut first_step_field = None;
        let mut t = self.state.current_t();

        for w in 0..self.inverse.window_span {
            field = evaluate_step(
                &field,
                t,
                self.scheme,
                &self.mass,
                &self.stiffness,
                &boundary,
                step + w,
            )?;
            if w == 0 {
                first_step_field = Some(field.clone());
            }
            t += self.scheme.dt;
        }

        let sensor = self.mesh.interpolate(&field, self.sensor_position);
        Ok((
            first_step_field.expect("window span is at least 1"),
            sensor,
        ))
    }
}

impl fmt::Debug for InverseSimulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InverseSimulation")
            .field("scheme", &self.scheme)
            .field("inverse", &self.inverse)
            .field("robin_alpha", &self.robin_alpha)
            .field("sensor_position", &self.sensor_position)
            .field("ambient(0)", &(self.ambient)(0.0))
            .field("total_steps", &self.total_steps)
            .field("committed_steps", &self.state.current_step_idx())
            .finish()
    }
}

impl Simulation for InverseSimulation {
    fn evaluate_step(&mut self) -> Result<(), EngineError> {
        if self.state.finished() {
            return Ok(());
        }

        let step = self.state.current_step_idx() + 1;
        let t_prev = self.state.current_t();
        let window_end = t_prev + self.inverse.window_span as f64 * self.scheme.dt;

        let measured = self.measurement.temperature_at(window_end).ok_or_else(|| {
            EngineError::MissingExperimentData {
                reason: format!("no measurement covers the window end at t={window_end}"),
            }
        })?;

        let mut guess = if step == 1 {
            self.inverse.q_init
        } else {
            self.last_flux + self.inverse.init_q_adjustment
        };
        let mut adjustment = self.inverse.init_q_adjustment;
        let mut prev_error: Option<f64> = None;
        let mut best_flux = guess;
        let mut best_error = f64::INFINITY;

        for _ in 0..self.inverse.max_window_iterations {
            let (first_step_field, sensor) = self.run_window(guess, step)?;
            let error = sensor - measured;

            if error.abs() < best_error {
                best_error = error.abs();
                best_flux = guess;
            }

            if error.abs() <= self.inverse.tolerance {
                let t_next = t_prev + self.scheme.dt;
                self.state.commit(&self.mesh, t_next, first_step_field, guess);
                self.last_flux = guess;
                if step >= self.total_steps {
                    self.state.mark_finished();
                }
                return Ok(());
            }

            match prev_error {
                // First rejection: march against the residual (more
                // flux always means a warmer sensor).
                None => {
                    if adjustment.signum() == error.signum() {
                        adjustment = -adjustment;
                    }
                }
                // Overshoot: reverse and damp.
                Some(prev) => {
                    if prev.signum() != error.signum() {
                        adjustment *= self.inverse.adjusting_value;
                    }
                }
            }
            guess += adjustment;
            prev_error = Some(error);
        }

        Err(EngineError::NonConvergentWindow {
            step,
            iterations: self.inverse.max_window_iterations,
            best_flux,
            best_error,
        })
    }

    fn has_finished(&self) -> bool {
        self.state.finished()
    }

    fn state(&self) -> &SimulationState {
        &self.state
    }

    fn experiment(&self) -> Option<&ExperimentData> {
        Some(&self.measurement)
    }

    fn final_error(&self) -> Option<f64> {
        rms_error(
            self.state.t(),
            self.state.temperature_at_poi(),
            &self.measurement.t,
            &self.measurement.temperature,
        )
    }

    fn name(&self) -> &'static str {
        "inverse"
    }
}
