//! Physical description of the problem
//!
//! This module holds everything that describes WHAT is being simulated,
//! independently of any numerical method:
//!
//! - [`Material`]: immutable property bundle (density, specific heat,
//!   conductivity)
//! - [`Mesh`]: 1D discretization of the slab into linear elements
//! - [`Boundary`]: the Neumann (prescribed flux) and Robin (convective)
//!   boundary conditions as pluggable time-indexed functions
//! - [`ExperimentData`]: measured reference series used for comparison
//!   and for driving the inverse estimator
//!
//! The numerical side (matrices, time stepping, execution) lives in
//! [`crate::solver`] and consumes these types by shared reference; none
//! of them is mutated once a run has started.

mod boundary;
mod experiment;
mod material;
mod mesh;

pub use boundary::{Boundary, BoundaryFn};
pub use experiment::{rms_error, ExperimentData};
pub use material::Material;
pub use mesh::Mesh;
