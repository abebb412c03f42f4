//! Engine error taxonomy
//!
//! Two families of errors exist (see the crate-level docs):
//!
//! 1. **Configuration errors** — invalid mesh, material or parameter
//!    ranges. These fail fast: the simulation never starts.
//! 2. **Numeric errors** — a singular linear system, a non-finite
//!    temperature field, or an inverse window that refuses to converge.
//!    These are fatal to the current run only; the execution controller
//!    catches them, keeps the partial history, and reports a failed
//!    terminal state.
//!
//! Every variant carries enough context (offending parameter name, step
//! index, best guess so far) for the caller to act on it without parsing
//! the message text.

use thiserror::Error;

/// Errors produced by the simulation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Mesh construction rejected (N < 1 or L <= 0).
    #[error("invalid mesh: {reason}")]
    InvalidMesh { reason: String },

    /// A material property is not strictly positive.
    #[error("invalid material: {name} must be positive, got {value}")]
    InvalidMaterial { name: &'static str, value: f64 },

    /// A configuration parameter is out of its documented range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The theta-step system matrix became singular (degenerate material
    /// or zero time step).
    #[error("singular system at step {step}: zero pivot in row {row}")]
    SingularSystem { step: usize, row: usize },

    /// The linear solve produced NaN or infinity, which usually signals
    /// a bad boundary function upstream.
    #[error("non-finite temperature at step {step}")]
    NonFiniteResult { step: usize },

    /// An inverse search window exhausted its iteration budget without
    /// matching the measurement. Carries the best guess found so the
    /// caller can decide to accept it or abort.
    #[error(
        "inverse window at step {step} did not converge after {iterations} iterations \
         (best flux {best_flux} W/m2, residual {best_error} K)"
    )]
    NonConvergentWindow {
        step: usize,
        iterations: usize,
        best_flux: f64,
        best_error: f64,
    },

    /// Experiment data required by the algorithm is missing or unusable
    /// (e.g. the inverse estimator without a measurement series).
    #[error("missing experiment data: {reason}")]
    MissingExperimentData { reason: String },
}

impl EngineError {
    /// Whether this error belongs to the numeric family.
    ///
    /// The execution controller degrades gracefully only from numeric
    /// errors (stop cleanly, keep partial history); everything else
    /// propagates to the caller unchanged.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            EngineError::SingularSystem { .. }
                | EngineError::NonFiniteResult { .. }
                | EngineError::NonConvergentWindow { .. }
        )
    }
}
