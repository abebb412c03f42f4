//! Boundary conditions
//!
//! The slab has two boundaries with different physics:
//!
//! - **Left (x = 0), Neumann**: a prescribed heat flux `q(t)` [W/m^2]
//!   pushed into the body. In the forward mode it is a known function of
//!   time; in the inverse mode it is the unknown being reconstructed.
//! - **Right (x = L), Robin**: convective exchange with an ambient
//!   medium, `alpha * (T_body - T_amb(t))`.
//!
//! Both time-indexed functions are pluggable boxed closures so callers
//! can substitute measured signals, steps, ramps, or anything else. The
//! defaults reproduce the canonical test scenario: a sinusoidal flux
//! with a 10 s period and a constant 21-degree ambient.

use std::f64::consts::PI;
use std::fmt;

/// Time-indexed boundary function, t [s] -> value.
pub type BoundaryFn = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Boundary conditions for one simulation run.
pub struct Boundary {
    /// Prescribed heat flux at the left boundary [W/m^2].
    pub heat_flux: BoundaryFn,

    /// Ambient temperature driving the Robin condition [deg C or K,
    /// consistent with the temperature field].
    pub ambient: BoundaryFn,

    /// Convective heat transfer coefficient of the Robin condition
    /// [W/(m^2 K)].
    pub robin_alpha: f64,
}

impl Boundary {
    /// Create boundary conditions from explicit functions.
    pub fn new(heat_flux: BoundaryFn, ambient: BoundaryFn, robin_alpha: f64) -> Self {
        Self {
            heat_flux,
            ambient,
            robin_alpha,
        }
    }

    /// Default boundary: flux `1e5 * sin(2 pi t / 10)` and constant
    /// ambient 21.0.
    pub fn sinusoidal(robin_alpha: f64) -> Self {
        Self {
            heat_flux: Box::new(|t| 1e5 * (2.0 * PI * t / 10.0).sin()),
            ambient: Box::new(|_| 21.0),
            robin_alpha,
        }
    }

    /// Constant flux and constant ambient. Convenient in tests and as
    /// the per-window boundary of the inverse search.
    pub fn constant(heat_flux: f64, ambient: f64, robin_alpha: f64) -> Self {
        Self {
            heat_flux: Box::new(move |_| heat_flux),
            ambient: Box::new(move |_| ambient),
            robin_alpha,
        }
    }
}

impl fmt::Debug for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Boundary")
            .field("robin_alpha", &self.robin_alpha)
            .field("heat_flux(0)", &(self.heat_flux)(0.0))
            .field("ambient(0)", &(self.ambient)(0.0))
            .finish()
    }
}
