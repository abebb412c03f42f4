//! Shared helpers for the integration suites.

use therm_rs::prelude::*;

/// Route engine logs through the test harness when RUST_LOG is set.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reference forward configuration: 1 m steel slab, 10 elements,
/// Crank-Nicolson. Callers override what they need.
pub fn steel_config() -> Config {
    Config {
        dt: 0.01,
        length: 1.0,
        place_of_interest: 0.0,
        number_of_elements: 10,
        callback_period: 100.0,
        theta: 0.5,
        robin_alpha: 10.0,
        initial_temperature: 0.0,
        t_start: 0.0,
        t_stop: 100.0,
    }
}

/// Step a simulation to its horizon without a controller.
pub fn run_to_end(sim: &mut dyn Simulation) {
    while !sim.has_finished() {
        sim.evaluate_step().expect("step failed");
    }
}

/// Forward run returning the temperature record at the point of
/// interest, for use as a synthetic measurement.
pub fn synthetic_measurement(
    config: &Config,
    boundary: Boundary,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut sim = ForwardSimulation::new(config, &Material::steel(), boundary, None)
        .expect("forward setup failed");
    run_to_end(&mut sim);
    (
        sim.state().t().to_vec(),
        sim.state().temperature_at_poi().to_vec(),
        sim.state().heat_flux().to_vec(),
    )
}
