//! therm-rs: 1D Transient Heat Conduction Framework
//!
//! Estimates and simulates one-dimensional transient heat conduction
//! through a solid slab. Two modes exist: a **forward** mode that
//! propagates temperature forward in time from a known boundary heat
//! flux, and an **inverse** mode that reconstructs an unknown boundary
//! flux from measured interior temperatures.
//!
//! # Architecture
//!
//! therm-rs is built on two core principles:
//!
//! 1. **Separation of physics and numerics**
//!    - [`physics`] describes the problem: material, mesh, boundary
//!      conditions, measured data
//!    - [`solver`] provides the method: matrix assembly, the
//!      theta-scheme step, and the forward/inverse algorithms behind
//!      one [`Simulation`](solver::Simulation) trait
//!
//! 2. **Message-passing execution**
//!    - [`runner`] drives a run on its worker thread through the
//!      run/pause/stop state machine
//!    - [`control`] defines the only two cross-thread surfaces: an
//!      inbound mpsc queue of [`ControlMessage`](control::ControlMessage)s
//!      and outbound owned [`ProgressSnapshot`](control::ProgressSnapshot)s
//!      — the engine never holds a reference into caller-owned state
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::mpsc;
//! use therm_rs::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     // 1. Describe the problem
//!     let config = Config {
//!         dt: 0.01,
//!         t_stop: 10.0,
//!         ..Config::default()
//!     };
//!     let material = Material::steel();
//!     let boundary = Boundary::sinusoidal(config.robin_alpha);
//!
//!     // 2. Pick the algorithm
//!     let mut sim = ForwardSimulation::new(&config, &material, boundary, None)?;
//!
//!     // 3. Drive it (a real caller runs this on a worker thread and
//!     //    keeps the sender to pause/stop the run)
//!     let (_control_tx, control_rx) = mpsc::channel();
//!     let report = ExecutionController::new(config.callback_period)
//!         .run(&mut sim, &control_rx, &mut NullSink)?;
//!
//!     assert_eq!(report.state, ExecutionState::Finished);
//!     assert_eq!(sim.state().t().len(), 1001);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: problem description (material, mesh, boundaries, data)
//! - [`solver`]: numerical engine (assembly, stepping, algorithms)
//! - [`runner`]: execution state machine
//! - [`control`]: control messages and progress sinks
//! - [`config`]: flat validated run parameters
//! - [`output`]: CSV export
//! - [`error`]: structured error taxonomy

pub mod config;
pub mod control;
pub mod error;
pub mod output;
pub mod physics;
pub mod runner;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use therm_rs::prelude::*;
    //! ```
    pub use crate::config::{Config, InverseConfig};
    pub use crate::control::{
        ChannelSink, ControlMessage, ExecutionState, NullSink, ProgressSink, ProgressSnapshot,
    };
    pub use crate::error::EngineError;
    pub use crate::output::{CsvExporter, ExportSeries, Exporter};
    pub use crate::physics::{Boundary, ExperimentData, Material, Mesh};
    pub use crate::runner::{ExecutionController, RunReport};
    pub use crate::solver::{ForwardSimulation, InverseSimulation, Simulation};
}
