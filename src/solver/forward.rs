//! Forward simulation
//!
//! Propagates the temperature field forward in time from a known
//! boundary heat flux: assemble once, then one theta step per call to
//! [`Simulation::evaluate_step`] until the horizon `t_stop` is reached.
//!
//! Committed times are computed from the step index rather than
//! accumulated (`t = t_start + k * dt`), so the final time lands on the
//! horizon within machine epsilon instead of drifting by the summed
//! rounding error of thousands of additions.

use crate::config::Config;
use crate::error::EngineError;
use crate::physics::{rms_error, Boundary, ExperimentData, Material, Mesh};
use crate::solver::assembly::assemble;
use crate::solver::state::SimulationState;
use crate::solver::step::{evaluate_step, ThetaScheme};
use crate::solver::traits::Simulation;
use crate::solver::tridiagonal::Tridiagonal;

/// Forward heat-conduction simulation.
pub struct ForwardSimulation {
    mesh: Mesh,
    mass: Tridiagonal,
    stiffness: Tridiagonal,
    boundary: Boundary,
    scheme: ThetaScheme,
    t_start: f64,
    total_steps: usize,
    state: SimulationState,
    experiment: Option<ExperimentData>,
}

impl ForwardSimulation {
    /// Build a forward run. Fails fast on any invalid configuration,
    /// mesh or material value; no stepping happens before everything is
    /// validated.
    pub fn new(
        config: &Config,
        material: &Material,
        boundary: Boundary,
        experiment: Option<ExperimentData>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let mesh = Mesh::new(config.length, config.number_of_elements)?;
        let (mass, stiffness) = assemble(&mesh, material)?;
        let scheme = ThetaScheme::new(config.dt, config.theta)?;

        let initial_flux = (boundary.heat_flux)(config.t_start);
        let state = SimulationState::new(
            &mesh,
            config.place_of_interest,
            config.t_start,
            config.initial_temperature,
            initial_flux,
        );

        Ok(Self {
            mesh,
            mass,
            stiffness,
            boundary,
            scheme,
            t_start: config.t_start,
            total_steps: config.total_steps(),
            state,
            experiment,
        })
    }

    /// Mesh of this run.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Simulation for ForwardSimulation {
    fn evaluate_step(&mut self) -> Result<(), EngineError> {
        if self.state.finished() {
            return Ok(());
        }

        let step = self.state.current_step_idx() + 1;
        let t_prev = self.state.current_t();

        let next = evaluate_step(
            self.state.temperature(),
            t_prev,
            self.scheme,
            &self.mass,
            &self.stiffness,
            &self.boundary,
            step,
        )?;

        let t_next = self.t_start + step as f64 * self.scheme.dt;
        let flux = (self.boundary.heat_flux)(t_next);
        self.state.commit(&self.mesh, t_next, next, flux);

        if step >= self.total_steps {
            self.state.mark_finished();
        }
        Ok(())
    }

    fn has_finished(&self) -> bool {
        self.state.finished()
    }

    fn state(&self) -> &SimulationState {
        &self.state
    }

    fn experiment(&self) -> Option<&ExperimentData> {
        self.experiment.as_ref()
    }

    fn final_error(&self) -> Option<f64> {
        let exp = self.experiment.as_ref()?;
        rms_error(
            self.state.t(),
            self.state.temperature_at_poi(),
            &exp.t,
            &exp.temperature,
        )
    }

    fn name(&self) -> &'static str {
        "forward"
    }
}
