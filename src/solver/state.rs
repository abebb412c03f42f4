//! Simulation state and history
//!
//! [`SimulationState`] owns everything a run accumulates: the current
//! temperature field plus append-only histories of time, field
//! snapshots, temperature at the point of interest, and applied boundary
//! flux. It is owned exclusively by the running simulation — the worker
//! thread mutates it, callers only ever receive point-in-time copies
//! through [`SimulationState::snapshot`].

use nalgebra::DVector;

use crate::physics::Mesh;
use crate::control::ProgressSnapshot;

/// Mutable state of one simulation run.
///
/// Histories are strictly append-only and aligned: after `k` committed
/// steps each history holds `k + 1` entries (the initial condition is
/// entry zero).
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current temperature field, one value per node.
    temperature: DVector<f64>,

    /// Committed time values [s].
    t: Vec<f64>,

    /// Committed temperature fields.
    temperature_history: Vec<DVector<f64>>,

    /// Temperature at the point of interest, one per committed time.
    temperature_at_poi: Vec<f64>,

    /// Applied boundary heat flux, one per committed time.
    heat_flux: Vec<f64>,

    /// Position whose temperature is tracked [m].
    place_of_interest: f64,

    /// Number of committed steps (initial condition not counted).
    current_step_idx: usize,

    finished: bool,
}

impl SimulationState {
    /// Initialize at `t_start` with a uniform field of `t0` degrees.
    /// `initial_flux` is the flux recorded for the initial entry.
    pub fn new(
        mesh: &Mesh,
        place_of_interest: f64,
        t_start: f64,
        t0: f64,
        initial_flux: f64,
    ) -> Self {
        let temperature = DVector::from_element(mesh.nodes(), t0);
        let at_poi = mesh.interpolate(&temperature, place_of_interest);
        Self {
            temperature_history: vec![temperature.clone()],
            temperature,
            t: vec![t_start],
            temperature_at_poi: vec![at_poi],
            heat_flux: vec![initial_flux],
            place_of_interest,
            current_step_idx: 0,
            finished: false,
        }
    }

    /// Commit one step: new field at time `t`, driven by `flux`.
    pub fn commit(&mut self, mesh: &Mesh, t: f64, temperature: DVector<f64>, flux: f64) {
        debug_assert!(
            t > *self.t.last().expect("state always has an initial entry"),
            "history must stay strictly increasing in time"
        );
        let at_poi = mesh.interpolate(&temperature, self.place_of_interest);
        self.temperature = temperature.clone();
        self.temperature_history.push(temperature);
        self.t.push(t);
        self.temperature_at_poi.push(at_poi);
        self.heat_flux.push(flux);
        self.current_step_idx += 1;
    }

    /// Current temperature field.
    pub fn temperature(&self) -> &DVector<f64> {
        &self.temperature
    }

    /// Committed time history.
    pub fn t(&self) -> &[f64] {
        &self.t
    }

    /// Latest committed time.
    pub fn current_t(&self) -> f64 {
        *self.t.last().expect("state always has an initial entry")
    }

    /// Committed temperature-field history.
    pub fn temperature_history(&self) -> &[DVector<f64>] {
        &self.temperature_history
    }

    /// Temperature-at-point-of-interest history.
    pub fn temperature_at_poi(&self) -> &[f64] {
        &self.temperature_at_poi
    }

    /// Applied-flux history.
    pub fn heat_flux(&self) -> &[f64] {
        &self.heat_flux
    }

    /// Tracked position [m].
    pub fn place_of_interest(&self) -> f64 {
        self.place_of_interest
    }

    /// Number of committed steps.
    pub fn current_step_idx(&self) -> usize {
        self.current_step_idx
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Mark the run as having reached its horizon. One-way.
    pub fn mark_finished(&mut self) {
        self.finished = true;
    }

    /// Owned point-in-time copy of the reportable histories.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            t: self.t.clone(),
            temperature_at_poi: self.temperature_at_poi.clone(),
            heat_flux: self.heat_flux.clone(),
        }
    }
}
