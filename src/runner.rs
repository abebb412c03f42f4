//! Execution controller
//!
//! Drives a [`Simulation`] through the run/pause/stop state machine:
//!
//! ```text
//! STARTED -> RUNNING <-> PAUSED -> STOPPED
//!               |
//!               +-> FINISHED        (horizon reached)
//!               +-> FAILED          (numeric error, history preserved)
//! ```
//!
//! One loop iteration polls the control queue non-blockingly (at most
//! one message consumed — a backlog is processed in order on subsequent
//! iterations), steps the simulation when running, sleeps a bounded
//! interval when paused, and emits rate-limited progress reports plus a
//! per-iteration is-running heartbeat. Reporting never blocks the step
//! loop beyond its own bounded work: a report is an owned snapshot
//! pushed into the caller's sink.
//!
//! The controller is meant to run on a dedicated worker thread; the
//! initiating thread keeps the `Sender` half of the control channel and
//! receives snapshots through whatever sink it installed.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::control::{ControlMessage, ExecutionState, ProgressSink};
use crate::error::EngineError;
use crate::solver::Simulation;

/// Outcome of one driven run.
///
/// A failed run still carries whatever history was committed (inside
/// the simulation) and the error norm over the partial overlap with the
/// experiment data; the offending error rides along in `failure`.
#[derive(Debug)]
pub struct RunReport {
    /// Terminal state: `Finished`, `Stopped` or `Failed`.
    pub state: ExecutionState,

    /// Error norm against the experiment data over the overlapping time
    /// domain; `None` when no data was supplied or nothing overlaps.
    pub error_norm: Option<f64>,

    /// The numeric error that ended the run, if any.
    pub failure: Option<EngineError>,
}

/// Drives the step loop of one simulation run.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionController {
    /// Report cadence in simulated seconds.
    callback_period: f64,

    /// How long a paused loop sleeps before re-polling. Bounds the
    /// worst-case latency to observe stop/continue.
    pause_sleep: Duration,
}

impl ExecutionController {
    pub fn new(callback_period: f64) -> Self {
        Self {
            callback_period,
            pause_sleep: Duration::from_millis(100),
        }
    }

    /// Override the pause re-poll interval (tests use a short one).
    pub fn with_pause_sleep(mut self, pause_sleep: Duration) -> Self {
        self.pause_sleep = pause_sleep;
        self
    }

    /// Run `sim` to its horizon or until stopped.
    ///
    /// Numeric errors from the step loop are degraded into a `Failed`
    /// report with the partial history preserved; configuration errors
    /// and anything else propagate unchanged.
    pub fn run(
        &self,
        sim: &mut dyn Simulation,
        control: &Receiver<ControlMessage>,
        sink: &mut dyn ProgressSink,
    ) -> Result<RunReport, EngineError> {
        let mut state = ExecutionState::Started;
        let mut last_report_t = sim.state().current_t();
        let mut failure = None;

        log::info!(
            "starting {} run at t={}",
            sim.name(),
            sim.state().current_t()
        );

        loop {
            // At most one control message per iteration.
            match control.try_recv() {
                Ok(ControlMessage::Pause) => state = ExecutionState::Paused,
                Ok(ControlMessage::Stop) => state = ExecutionState::Stopped,
                Ok(ControlMessage::Continue) => state = ExecutionState::Running,
                // An empty queue promotes the entry state; a dropped
                // sender means a detached run that simply keeps going.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                    if state == ExecutionState::Started {
                        state = ExecutionState::Running;
                    }
                }
            }

            sink.heartbeat(state == ExecutionState::Running);

            match state {
                ExecutionState::Running => {
                    if let Err(err) = sim.evaluate_step() {
                        if err.is_numeric() {
                            log::warn!("{} run failed: {err}", sim.name());
                            failure = Some(err);
                            state = ExecutionState::Failed;
                        } else {
                            return Err(err);
                        }
                    } else if sim.has_finished() {
                        state = ExecutionState::Finished;
                    }
                }
                ExecutionState::Paused => thread::sleep(self.pause_sleep),
                ExecutionState::Stopped | ExecutionState::Finished | ExecutionState::Failed => {}
                ExecutionState::Started => unreachable!("entry state is promoted above"),
            }

            // Rate-limited reporting, decoupled from step cadence.
            if sim.state().current_t() > last_report_t + self.callback_period {
                sink.report(sim.state().snapshot());
                last_report_t += self.callback_period;
            }

            if state.is_terminal() {
                break;
            }
        }

        // Forced flush: the final report always carries the full
        // committed history.
        sink.report(sim.state().snapshot());

        let error_norm = sim.final_error();
        log::info!(
            "{} run ended in state {:?} after {} steps (error norm {:?})",
            sim.name(),
            state,
            sim.state().current_step_idx(),
            error_norm
        );

        Ok(RunReport {
            state,
            error_norm,
            failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::control::NullSink;
    use crate::physics::{Boundary, Material};
    use crate::solver::ForwardSimulation;
    use std::sync::mpsc;

    fn tiny_forward() -> ForwardSimulation {
        let config = Config {
            dt: 0.1,
            t_stop: 1.0,
            ..Config::default()
        };
        ForwardSimulation::new(
            &config,
            &Material::steel(),
            Boundary::constant(0.0, 0.0, 10.0),
            None,
        )
        .unwrap()
    }

    #[test]
    fn detached_run_finishes() {
        // Sender dropped immediately: the run must still reach FINISHED.
        let (tx, rx) = mpsc::channel();
        drop(tx);

        let mut sim = tiny_forward();
        let report = ExecutionController::new(100.0)
            .run(&mut sim, &rx, &mut NullSink)
            .unwrap();

        assert_eq!(report.state, ExecutionState::Finished);
        assert!(report.failure.is_none());
        assert_eq!(report.error_norm, None);
        assert_eq!(sim.state().t().len(), 11);
    }

    #[test]
    fn queued_stop_truncates_immediately() {
        let (tx, rx) = mpsc::channel();
        tx.send(ControlMessage::Stop).unwrap();

        let mut sim = tiny_forward();
        let report = ExecutionController::new(100.0)
            .run(&mut sim, &rx, &mut NullSink)
            .unwrap();

        assert_eq!(report.state, ExecutionState::Stopped);
        // Stopped before any step: only the initial condition exists.
        assert_eq!(sim.state().t().len(), 1);
    }

    #[test]
    fn numeric_failure_degrades_to_a_failed_report() {
        let config = Config {
            dt: 0.1,
            t_stop: 1.0,
            ..Config::default()
        };
        // The boundary turns poisonous after half a second.
        let mut sim = ForwardSimulation::new(
            &config,
            &Material::steel(),
            Boundary::new(
                Box::new(|t| if t > 0.5 { f64::NAN } else { 0.0 }),
                Box::new(|_| 0.0),
                10.0,
            ),
            None,
        )
        .unwrap();

        let (_tx, rx) = mpsc::channel();
        let report = ExecutionController::new(100.0)
            .run(&mut sim, &rx, &mut NullSink)
            .unwrap();

        assert_eq!(report.state, ExecutionState::Failed);
        assert!(matches!(
            report.failure,
            Some(EngineError::NonFiniteResult { .. })
        ));
        // Partial history survives.
        assert!(sim.state().t().len() > 1);
        assert!(sim.state().t().len() < 11);
    }
}
