//! Numerical engine
//!
//! # Architecture (WHAT vs HOW)
//!
//! The solver side separates three concerns:
//!
//! 1. **Assembly** — turns a [`Mesh`](crate::physics::Mesh) and a
//!    [`Material`](crate::physics::Material) into the tridiagonal mass
//!    and stiffness matrices, once per run ([`assembly`]).
//! 2. **Stepping** — the pure theta-method step that advances a
//!    temperature field by `dt`, solving one tridiagonal system
//!    ([`step`], [`tridiagonal`]).
//! 3. **Algorithms** — the [`Simulation`] strategy trait with its two
//!    implementations: [`ForwardSimulation`] propagates a known flux
//!    forward in time; [`InverseSimulation`] reconstructs an unknown
//!    flux from measurements by re-running short forward bursts inside
//!    a sliding-window search.
//!
//! The execution state machine that drives either algorithm lives one
//! level up in [`crate::runner`]; it only sees the trait.
//!
//! # Module organization
//!
//! - [`tridiagonal`]: three-band matrix type and the Thomas solve
//! - [`assembly`]: finite-element matrix assembly with boundary
//!   half-weighting
//! - [`step`]: the theta-method step and its [`ThetaScheme`] parameters
//! - [`state`]: append-only run state and histories
//! - [`traits`]: the [`Simulation`] seam
//! - [`forward`], [`inverse`]: the two algorithms

pub mod assembly;
pub mod forward;
pub mod inverse;
pub mod state;
pub mod step;
pub mod traits;
pub mod tridiagonal;

pub use assembly::assemble;
pub use forward::ForwardSimulation;
pub use inverse::InverseSimulation;
pub use state::SimulationState;
pub use step::{evaluate_step, ThetaScheme};
pub use traits::Simulation;
pub use tridiagonal::Tridiagonal;
