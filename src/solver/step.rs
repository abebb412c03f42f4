//! Theta-method time step
//!
//! # Mathematical background
//!
//! The semi-discrete conduction equation `M dT/dt + K T = f(t)` is
//! advanced with the one-parameter theta family:
//!
//! ```text
//! (M + dt*theta*K) T_next = (M - dt*(1-theta)*K) T_prev
//!                         + dt*(1-theta)*f(t_prev) + dt*theta*f(t_prev + dt)
//! ```
//!
//! theta = 0 is forward Euler (fully explicit), theta = 1 is backward
//! Euler (fully implicit), theta = 0.5 is Crank-Nicolson: second-order
//! accurate in time and unconditionally stable, so it tolerates large
//! steps without oscillation. That makes 0.5 the recommended default.
//!
//! The boundary load `f` has two parts, both theta-weighted between the
//! old and the new time level:
//!
//! - Neumann at node 0: the prescribed heat flux enters `b[0]`.
//! - Robin at the last node: the explicit body-temperature part leaves
//!   `b[last]`, the implicit part lands on the system diagonal, and the
//!   ambient-temperature contribution enters `b[last]`.
//!
//! The step is a pure function of its arguments; all state mutation
//! happens in the caller.

use nalgebra::DVector;

use crate::error::EngineError;
use crate::physics::Boundary;
use crate::solver::tridiagonal::Tridiagonal;

/// Time-integration parameters shared by every step of a run.
#[derive(Debug, Clone, Copy)]
pub struct ThetaScheme {
    /// Step size [s].
    pub dt: f64,
    /// Explicit/implicit blend, in [0, 1].
    pub theta: f64,
}

impl ThetaScheme {
    /// Validate and build. `dt` must be positive and finite, `theta`
    /// inside [0, 1].
    pub fn new(dt: f64, theta: f64) -> Result<Self, EngineError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "dt",
                reason: format!("must be positive and finite, got {dt}"),
            });
        }
        if !(0.0..=1.0).contains(&theta) {
            return Err(EngineError::InvalidParameter {
                name: "theta",
                reason: format!("must lie in [0, 1], got {theta}"),
            });
        }
        Ok(Self { dt, theta })
    }
}

/// Advance the temperature field one step.
///
/// `step` is the index of the step being produced; it only labels error
/// context.
pub fn evaluate_step(
    temperature: &DVector<f64>,
    t_prev: f64,
    scheme: ThetaScheme,
    mass: &Tridiagonal,
    stiffness: &Tridiagonal,
    boundary: &Boundary,
    step: usize,
) -> Result<DVector<f64>, EngineError> {
    let ThetaScheme { dt, theta } = scheme;
    let last = temperature.len() - 1;

    // A = M + dt*theta*K, b = (M - dt*(1-theta)*K) * T_prev
    let mut a = mass.add_scaled(stiffness, dt * theta);
    let mut b = mass
        .add_scaled(stiffness, -dt * (1.0 - theta))
        .mul_vec(temperature);

    // Neumann boundary: prescribed flux entering the left face,
    // explicit portion at t_prev, implicit portion at t_prev + dt.
    b[0] += dt * (1.0 - theta) * (boundary.heat_flux)(t_prev);
    b[0] += dt * theta * (boundary.heat_flux)(t_prev + dt);

    // Robin boundary: alpha * (T_body - T_amb) convective exchange on
    // the right face, split the same way.
    let alpha = boundary.robin_alpha;
    b[last] -= dt * (1.0 - theta) * alpha * temperature[last];
    a.add_to_diag(last, dt * theta * alpha);
    b[last] += dt * (1.0 - theta) * alpha * (boundary.ambient)(t_prev);
    b[last] += dt * theta * alpha * (boundary.ambient)(t_prev + dt);

    let next = a.solve(&b, step)?;

    if next.iter().any(|v| !v.is_finite()) {
        return Err(EngineError::NonFiniteResult { step });
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Material, Mesh};
    use crate::solver::assembly::assemble;

    fn setup() -> (Mesh, Tridiagonal, Tridiagonal) {
        let mesh = Mesh::new(1.0, 10).unwrap();
        let (mass, stiffness) = assemble(&mesh, &Material::steel()).unwrap();
        (mesh, mass, stiffness)
    }

    #[test]
    fn equilibrium_field_stays_put() {
        // Zero flux, ambient equal to the uniform field: nothing moves.
        let (mesh, mass, stiffness) = setup();
        let boundary = Boundary::constant(0.0, 21.0, 10.0);
        let scheme = ThetaScheme::new(0.5, 0.5).unwrap();

        let t0 = DVector::from_element(mesh.nodes(), 21.0);
        let t1 = evaluate_step(&t0, 0.0, scheme, &mass, &stiffness, &boundary, 1).unwrap();

        for i in 0..mesh.nodes() {
            assert!((t1[i] - 21.0).abs() < 1e-9, "node {i} drifted");
        }
    }

    #[test]
    fn positive_flux_heats_the_left_face_first() {
        let (mesh, mass, stiffness) = setup();
        let boundary = Boundary::constant(1e5, 0.0, 10.0);
        let scheme = ThetaScheme::new(0.01, 0.5).unwrap();

        let t0 = DVector::zeros(mesh.nodes());
        let t1 = evaluate_step(&t0, 0.0, scheme, &mass, &stiffness, &boundary, 1).unwrap();

        assert!(t1[0] > 0.0);
        assert!(t1[0] > t1[mesh.nodes() - 1]);
    }

    #[test]
    fn hot_body_cools_toward_the_ambient() {
        let (mesh, mass, stiffness) = setup();
        let boundary = Boundary::constant(0.0, 20.0, 50.0);
        let scheme = ThetaScheme::new(1.0, 0.5).unwrap();

        let mut temp = DVector::from_element(mesh.nodes(), 100.0);
        let mut t = 0.0;
        for step in 1..=100 {
            temp = evaluate_step(&temp, t, scheme, &mass, &stiffness, &boundary, step).unwrap();
            t += scheme.dt;
        }

        let last = mesh.nodes() - 1;
        assert!(temp[last] < 100.0, "Robin face did not cool");
        assert!(temp[last] > 20.0, "cooling overshot the ambient");
    }

    #[test]
    fn zero_dt_is_a_parameter_error() {
        assert!(matches!(
            ThetaScheme::new(0.0, 0.5),
            Err(EngineError::InvalidParameter { name: "dt", .. })
        ));
        assert!(ThetaScheme::new(0.01, 1.5).is_err());
        assert!(ThetaScheme::new(0.01, -0.1).is_err());
    }

    #[test]
    fn nan_boundary_output_is_caught() {
        let (mesh, mass, stiffness) = setup();
        let boundary = Boundary::new(Box::new(|_| f64::NAN), Box::new(|_| 21.0), 10.0);
        let scheme = ThetaScheme::new(0.01, 0.5).unwrap();

        let t0 = DVector::zeros(mesh.nodes());
        let err = evaluate_step(&t0, 0.0, scheme, &mass, &stiffness, &boundary, 3).unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteResult { step: 3 }));
    }
}
