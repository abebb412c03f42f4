//! Run/pause/stop state machine, driven the way the engine is meant to
//! be used: a controller on a worker thread, a control channel and a
//! snapshot channel back to the caller.

mod common;

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use common::steel_config;
use therm_rs::prelude::*;

fn short_forward() -> ForwardSimulation {
    let config = Config {
        dt: 0.1,
        t_stop: 1.0,
        ..steel_config()
    };
    ForwardSimulation::new(
        &config,
        &Material::steel(),
        Boundary::constant(0.0, 21.0, 10.0),
        None,
    )
    .expect("forward setup failed")
}

/// A stop queued after `k` continues commits exactly `k` steps: one
/// message is consumed per loop iteration, and the stop iteration does
/// not step.
#[test]
fn stop_after_k_continues_commits_k_steps() {
    common::init_logging();
    let k = 5;
    let (tx, rx) = mpsc::channel();
    for _ in 0..k {
        tx.send(ControlMessage::Continue).unwrap();
    }
    tx.send(ControlMessage::Stop).unwrap();

    let mut sim = short_forward();
    let report = ExecutionController::new(100.0)
        .run(&mut sim, &rx, &mut NullSink)
        .unwrap();

    assert_eq!(report.state, ExecutionState::Stopped);
    assert_eq!(sim.state().t().len(), k + 1);
    assert!(report.failure.is_none());
}

/// Pausing and resuming must not change the committed trajectory, only
/// delay it. Both runs see the exact same arithmetic.
#[test]
fn pause_and_continue_leave_the_trajectory_unchanged() {
    let controller =
        ExecutionController::new(100.0).with_pause_sleep(Duration::from_millis(1));

    let (tx, rx) = mpsc::channel();
    drop(tx);
    let mut plain = short_forward();
    controller.run(&mut plain, &rx, &mut NullSink).unwrap();

    let (tx, rx) = mpsc::channel();
    for _ in 0..3 {
        tx.send(ControlMessage::Pause).unwrap();
        // A redundant pause on an already paused run is a no-op.
        tx.send(ControlMessage::Pause).unwrap();
        tx.send(ControlMessage::Continue).unwrap();
    }
    let mut interrupted = short_forward();
    let report = controller.run(&mut interrupted, &rx, &mut NullSink).unwrap();

    assert_eq!(report.state, ExecutionState::Finished);
    assert_eq!(plain.state().t().len(), interrupted.state().t().len());
    for (a, b) in plain
        .state()
        .temperature_at_poi()
        .iter()
        .zip(interrupted.state().temperature_at_poi())
    {
        assert_eq!(a, b, "pause changed the committed history");
    }
}

/// Every loop iteration emits a heartbeat; during pauses it reads
/// not-running.
#[test]
fn heartbeat_tracks_the_running_state() {
    let (control_tx, control_rx) = mpsc::channel();
    control_tx.send(ControlMessage::Pause).unwrap();
    control_tx.send(ControlMessage::Continue).unwrap();
    drop(control_tx);

    let (snap_tx, _snap_rx) = mpsc::channel();
    let (beat_tx, beat_rx) = mpsc::channel();
    let mut sink = ChannelSink::new(snap_tx).with_heartbeats(beat_tx);

    let mut sim = short_forward();
    ExecutionController::new(100.0)
        .with_pause_sleep(Duration::from_millis(1))
        .run(&mut sim, &control_rx, &mut sink)
        .unwrap();
    drop(sink);

    let beats: Vec<bool> = beat_rx.try_iter().collect();
    // One paused iteration, then ten running steps to the horizon.
    assert_eq!(beats.len(), 11);
    assert_eq!(beats.iter().filter(|&&b| !b).count(), 1);
    assert_eq!(beats.iter().filter(|&&b| b).count(), 10);
}

/// Reports arrive once per callback period plus a forced final flush,
/// and the final snapshot always carries the full history.
#[test]
fn reports_are_rate_limited_with_a_final_flush() {
    let (tx, rx) = mpsc::channel();
    drop(tx);
    let (snap_tx, snap_rx) = mpsc::channel();
    let mut sink = ChannelSink::new(snap_tx);

    let mut sim = short_forward();
    ExecutionController::new(0.25)
        .run(&mut sim, &rx, &mut sink)
        .unwrap();
    drop(sink);

    let snapshots: Vec<ProgressSnapshot> = snap_rx.try_iter().collect();
    // dt=0.1 over 1 s with a 0.25 s period: reports near t=0.3, 0.6,
    // 0.8, plus the flush.
    assert_eq!(snapshots.len(), 4);
    let last = snapshots.last().unwrap();
    assert_eq!(last.t.len(), 11);
    assert_eq!(last.temperature_at_poi.len(), 11);
    assert_eq!(last.heat_flux.len(), 11);

    // Snapshots only ever grow.
    for pair in snapshots.windows(2) {
        assert!(pair[0].t.len() <= pair[1].t.len());
    }
}

/// Full worker-thread round trip: the controller runs detached on its
/// own thread and the caller consumes snapshots until the run ends.
#[test]
fn worker_thread_run_delivers_snapshots_and_a_report() {
    let (control_tx, control_rx) = mpsc::channel::<ControlMessage>();
    let (snap_tx, snap_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let mut sink = ChannelSink::new(snap_tx);
        let mut sim = short_forward();
        let report = ExecutionController::new(0.25)
            .run(&mut sim, &control_rx, &mut sink)
            .unwrap();
        (report, sim.state().t().len())
    });

    // Receive until the worker drops its sender.
    let mut last_len = 0;
    while let Ok(snapshot) = snap_rx.recv() {
        last_len = snapshot.t.len();
    }
    let (report, committed) = handle.join().expect("worker thread panicked");
    drop(control_tx);

    assert_eq!(report.state, ExecutionState::Finished);
    assert!(report.failure.is_none());
    assert_eq!(committed, 11);
    assert_eq!(last_len, 11);
}
