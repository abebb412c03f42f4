//! Control messages and progress reporting
//!
//! The worker thread owning a run talks to the outside world through two
//! one-directional channels, and nothing else:
//!
//! - **Inbound**: [`ControlMessage`]s posted into an
//!   `std::sync::mpsc` queue, polled non-blockingly once per loop
//!   iteration. Unrecognized tokens are rejected at the parse boundary
//!   (logged, never fatal).
//! - **Outbound**: [`ProgressSnapshot`]s pushed into a [`ProgressSink`]
//!   at the report cadence, plus an is-running heartbeat every
//!   iteration. Snapshots are owned point-in-time copies — the engine
//!   never hands out a live reference into its own state.

use std::str::FromStr;
use std::sync::mpsc::Sender;

/// Command posted by the initiating thread. Consumed at most once per
/// loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    Pause,
    Stop,
    Continue,
}

impl FromStr for ControlMessage {
    type Err = String;

    /// Accepts exactly the symbolic tokens `pause`, `stop`, `continue`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pause" => Ok(ControlMessage::Pause),
            "stop" => Ok(ControlMessage::Stop),
            "continue" => Ok(ControlMessage::Continue),
            other => Err(format!("unrecognized control message: {other:?}")),
        }
    }
}

/// Parse a control token, logging and discarding anything unknown.
///
/// This is the tolerant entry point for text-based callers (a GUI shell,
/// a command socket): bad input is a warning, not a failure.
pub fn parse_control_token(token: &str) -> Option<ControlMessage> {
    match token.parse() {
        Ok(msg) => Some(msg),
        Err(err) => {
            log::warn!("ignoring control message: {err}");
            None
        }
    }
}

/// Execution state machine of one run.
///
/// `Started` is the only entry state. `Stopped`, `Finished` and `Failed`
/// are terminal; `Running` and `Paused` alternate freely in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Started,
    Running,
    Paused,
    Stopped,
    Finished,
    Failed,
}

impl ExecutionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionState::Stopped | ExecutionState::Finished | ExecutionState::Failed
        )
    }
}

/// Owned point-in-time copy of the reportable histories.
///
/// All three arrays are aligned: one entry per committed time value,
/// the initial condition included.
#[derive(Debug, Clone, Default)]
pub struct ProgressSnapshot {
    /// Committed time values [s].
    pub t: Vec<f64>,

    /// Temperature at the point of interest, per committed time.
    pub temperature_at_poi: Vec<f64>,

    /// Applied boundary heat flux, per committed time [W/m^2].
    pub heat_flux: Vec<f64>,
}

/// Receiver of rate-limited progress reports.
///
/// `report` is called at the configured cadence and once more with the
/// full history at termination. `heartbeat` fires every loop iteration
/// regardless of the reporting cadence, carrying whether the run is
/// currently stepping — this lets the caller track elapsed running time
/// independently of plotting.
pub trait ProgressSink {
    fn report(&mut self, snapshot: ProgressSnapshot);

    fn heartbeat(&mut self, _running: bool) {}
}

/// Sink that drops everything. Forward runs without an observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&mut self, _snapshot: ProgressSnapshot) {}
}

/// Sink that forwards snapshots over an mpsc channel, the
/// message-passing replacement for handing the engine a shared plot
/// handle. A disconnected receiver is not an error: the run keeps
/// going, the report is simply dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    snapshots: Sender<ProgressSnapshot>,
    heartbeats: Option<Sender<bool>>,
}

impl ChannelSink {
    pub fn new(snapshots: Sender<ProgressSnapshot>) -> Self {
        Self {
            snapshots,
            heartbeats: None,
        }
    }

    /// Additionally forward the per-iteration running signal.
    pub fn with_heartbeats(mut self, heartbeats: Sender<bool>) -> Self {
        self.heartbeats = Some(heartbeats);
        self
    }
}

impl ProgressSink for ChannelSink {
    fn report(&mut self, snapshot: ProgressSnapshot) {
        if self.snapshots.send(snapshot).is_err() {
            log::debug!("progress receiver disconnected; dropping report");
        }
    }

    fn heartbeat(&mut self, running: bool) {
        if let Some(tx) = &self.heartbeats {
            let _ = tx.send(running);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn exact_tokens_parse() {
        assert_eq!("pause".parse(), Ok(ControlMessage::Pause));
        assert_eq!("stop".parse(), Ok(ControlMessage::Stop));
        assert_eq!("continue".parse(), Ok(ControlMessage::Continue));
    }

    #[test]
    fn near_misses_are_rejected() {
        assert!(ControlMessage::from_str("Pause").is_err());
        assert!(ControlMessage::from_str("halt").is_err());
        assert!(ControlMessage::from_str("").is_err());
        assert_eq!(parse_control_token("resume"), None);
        assert_eq!(parse_control_token("stop"), Some(ControlMessage::Stop));
    }

    #[test]
    fn terminal_states() {
        assert!(ExecutionState::Stopped.is_terminal());
        assert!(ExecutionState::Finished.is_terminal());
        assert!(ExecutionState::Failed.is_terminal());
        assert!(!ExecutionState::Running.is_terminal());
        assert!(!ExecutionState::Paused.is_terminal());
        assert!(!ExecutionState::Started.is_terminal());
    }

    #[test]
    fn channel_sink_survives_a_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx);
        drop(rx);
        // Must not panic or error out.
        sink.report(ProgressSnapshot::default());
        sink.heartbeat(true);
    }

    #[test]
    fn channel_sink_forwards_snapshots_and_heartbeats() {
        let (tx, rx) = mpsc::channel();
        let (hb_tx, hb_rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx).with_heartbeats(hb_tx);

        sink.report(ProgressSnapshot {
            t: vec![0.0, 0.1],
            temperature_at_poi: vec![21.0, 21.5],
            heat_flux: vec![0.0, 100.0],
        });
        sink.heartbeat(true);

        assert_eq!(rx.recv().unwrap().t.len(), 2);
        assert!(hb_rx.recv().unwrap());
    }
}
