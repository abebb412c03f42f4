//! The `Simulation` strategy seam
//!
//! The execution controller drives any algorithm through this trait, one
//! step at a time. Forward propagation and inverse reconstruction both
//! implement it, so the run/pause/stop machinery, progress reporting and
//! CSV export are written exactly once. The algorithm is selected once
//! at run start — there is no string-tag dispatch inside the loop.

use crate::error::EngineError;
use crate::physics::ExperimentData;
use crate::solver::state::SimulationState;

/// One steppable simulation algorithm.
pub trait Simulation {
    /// Advance by exactly one committed step.
    ///
    /// A step that fails leaves all previously committed history intact;
    /// numeric errors are reported, never swallowed.
    fn evaluate_step(&mut self) -> Result<(), EngineError>;

    /// Whether the run has reached its time horizon. Once true, further
    /// `evaluate_step` calls are not made.
    fn has_finished(&self) -> bool;

    /// The state owned by this run.
    fn state(&self) -> &SimulationState;

    /// Experimental comparison data, when supplied.
    fn experiment(&self) -> Option<&ExperimentData>;

    /// Error norm between the run's prediction and the experiment data
    /// over their overlapping time domain. `None` when no data overlaps
    /// — distinct from a perfect-match 0.0.
    fn final_error(&self) -> Option<f64>;

    /// Algorithm name; also the stem of exported CSV filenames
    /// (`forward`, `inverse`).
    fn name(&self) -> &'static str;
}
