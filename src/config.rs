//! Engine configuration
//!
//! Two flat parameter structs cover the whole engine surface:
//! [`Config`] for every run, [`InverseConfig`] for the inverse
//! estimator on top. Both validate fail-fast — an out-of-range value is
//! rejected before any stepping begins — and both can be built from a
//! flat `name -> value` mapping, which is the contract the engine offers
//! to configuration front-ends (a GUI form, a parameter file): a fixed,
//! enumerable schema, no dynamically named fields.
//!
//! Unknown keys in the mapping are ignored with a warning; missing keys
//! fall back to the documented defaults.

use std::collections::HashMap;

use crate::error::EngineError;

/// Parameters of a simulation run. SI units throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Time step [s].
    pub dt: f64,

    /// Slab length L [m].
    pub length: f64,

    /// Position whose temperature is tracked and compared [m].
    pub place_of_interest: f64,

    /// Number of finite elements N (>= 1).
    pub number_of_elements: usize,

    /// Progress-report cadence in simulated seconds.
    pub callback_period: f64,

    /// Explicit/implicit blend of the time scheme, in [0, 1].
    pub theta: f64,

    /// Convective coefficient of the Robin boundary [W/(m^2 K)].
    pub robin_alpha: f64,

    /// Uniform initial temperature.
    pub initial_temperature: f64,

    /// Simulation start time [s].
    pub t_start: f64,

    /// Simulation horizon [s]. Forward runs step until they reach it.
    pub t_stop: f64,
}

impl Default for Config {
    /// The reference scenario: 1 m slab, 10 elements, Crank-Nicolson,
    /// dt = 0.01 s, horizon 100 s.
    fn default() -> Self {
        Self {
            dt: 0.01,
            length: 1.0,
            place_of_interest: 0.0,
            number_of_elements: 10,
            callback_period: 100.0,
            theta: 0.5,
            robin_alpha: 10.0,
            initial_temperature: 0.0,
            t_start: 0.0,
            t_stop: 100.0,
        }
    }
}

impl Config {
    /// Build from a flat `name -> value` mapping, starting from the
    /// defaults. Recognized keys: `dt`, `object_length`,
    /// `place_of_interest`, `number_of_elements`, `callback_period`,
    /// `theta`, `robin_alpha`, `initial_temperature`, `t_start`,
    /// `t_stop`.
    pub fn from_map(values: &HashMap<String, f64>) -> Result<Self, EngineError> {
        let mut config = Self::default();
        for (key, &value) in values {
            match key.as_str() {
                "dt" => config.dt = value,
                "object_length" => config.length = value,
                "place_of_interest" => config.place_of_interest = value,
                "number_of_elements" => {
                    if value < 1.0 || value.fract() != 0.0 {
                        return Err(EngineError::InvalidParameter {
                            name: "number_of_elements",
                            reason: format!("must be a positive integer, got {value}"),
                        });
                    }
                    config.number_of_elements = value as usize;
                }
                "callback_period" => config.callback_period = value,
                "theta" => config.theta = value,
                "robin_alpha" => config.robin_alpha = value,
                "initial_temperature" => config.initial_temperature = value,
                "t_start" => config.t_start = value,
                "t_stop" => config.t_stop = value,
                other => log::warn!("ignoring unknown configuration key {other:?}"),
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast range validation; the simulation never starts on a bad
    /// configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "dt",
                reason: format!("must be positive and finite, got {}", self.dt),
            });
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "object_length",
                reason: format!("must be positive and finite, got {}", self.length),
            });
        }
        if self.number_of_elements < 1 {
            return Err(EngineError::InvalidParameter {
                name: "number_of_elements",
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(EngineError::InvalidParameter {
                name: "theta",
                reason: format!("must lie in [0, 1], got {}", self.theta),
            });
        }
        if !(self.place_of_interest.is_finite()
            && (0.0..=self.length).contains(&self.place_of_interest))
        {
            return Err(EngineError::InvalidParameter {
                name: "place_of_interest",
                reason: format!(
                    "must lie inside the slab [0, {}], got {}",
                    self.length, self.place_of_interest
                ),
            });
        }
        if !(self.callback_period.is_finite() && self.callback_period > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "callback_period",
                reason: format!("must be positive, got {}", self.callback_period),
            });
        }
        if !(self.robin_alpha.is_finite() && self.robin_alpha >= 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "robin_alpha",
                reason: format!("must be non-negative, got {}", self.robin_alpha),
            });
        }
        if !(self.t_stop.is_finite() && self.t_stop > self.t_start) {
            return Err(EngineError::InvalidParameter {
                name: "t_stop",
                reason: format!(
                    "horizon {} must lie after start {}",
                    self.t_stop, self.t_start
                ),
            });
        }
        Ok(())
    }

    /// Total number of steps to reach the horizon.
    pub fn total_steps(&self) -> usize {
        ((self.t_stop - self.t_start) / self.dt).ceil() as usize
    }
}

/// Extra parameters of the inverse estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseConfig {
    /// Look-ahead window length in steps (>= 1).
    pub window_span: usize,

    /// Acceptable |simulated - measured| at the window end [K].
    pub tolerance: f64,

    /// Flux guess for the very first window [W/m^2].
    pub q_init: f64,

    /// Magnitude of the first adjustment step of every window [W/m^2].
    pub init_q_adjustment: f64,

    /// Coefficient the adjustment step is multiplied by when the error
    /// changes sign. Typically negative (reverse and damp); -0.7 by
    /// default.
    pub adjusting_value: f64,

    /// Iteration budget per window before giving up with
    /// [`EngineError::NonConvergentWindow`].
    pub max_window_iterations: usize,
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            window_span: 3,
            tolerance: 1e-3,
            q_init: 0.0,
            init_q_adjustment: 20.0,
            adjusting_value: -0.7,
            max_window_iterations: 500,
        }
    }
}

impl InverseConfig {
    /// Build from a flat mapping; recognized keys: `window_span`,
    /// `tolerance`, `q_init`, `init_q_adjustment`, `adjusting_value`,
    /// `max_window_iterations`.
    pub fn from_map(values: &HashMap<String, f64>) -> Result<Self, EngineError> {
        let mut config = Self::default();
        for (key, &value) in values {
            match key.as_str() {
                "window_span" => {
                    if value < 1.0 || value.fract() != 0.0 {
                        return Err(EngineError::InvalidParameter {
                            name: "window_span",
                            reason: format!("must be a positive integer, got {value}"),
                        });
                    }
                    config.window_span = value as usize;
                }
                "tolerance" => config.tolerance = value,
                "q_init" => config.q_init = value,
                "init_q_adjustment" => config.init_q_adjustment = value,
                "adjusting_value" => config.adjusting_value = value,
                "max_window_iterations" => config.max_window_iterations = value as usize,
                other => log::warn!("ignoring unknown inverse configuration key {other:?}"),
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window_span < 1 {
            return Err(EngineError::InvalidParameter {
                name: "window_span",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "tolerance",
                reason: format!("must be positive, got {}", self.tolerance),
            });
        }
        if !(self.init_q_adjustment.is_finite() && self.init_q_adjustment != 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "init_q_adjustment",
                reason: "must be a non-zero step".into(),
            });
        }
        if !self.adjusting_value.is_finite() || self.adjusting_value.abs() >= 1.0 {
            return Err(EngineError::InvalidParameter {
                name: "adjusting_value",
                reason: format!(
                    "magnitude must be below 1 for the search to damp, got {}",
                    self.adjusting_value
                ),
            });
        }
        if self.max_window_iterations == 0 {
            return Err(EngineError::InvalidParameter {
                name: "max_window_iterations",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
