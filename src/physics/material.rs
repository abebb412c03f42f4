//! Material properties
//!
//! A [`Material`] is an immutable bundle of the three properties the
//! conduction equation needs. It is shared by reference across a whole
//! simulation run; there is no lookup table or registry inside the
//! engine — callers construct whichever material they need and pass it in.

use crate::error::EngineError;

/// Immutable physical property bundle.
///
/// All three properties must be strictly positive; [`Material::new`]
/// rejects anything else before a simulation can start.
///
/// # Example
///
/// ```rust
/// use therm_rs::physics::Material;
///
/// let steel = Material::steel();
/// assert_eq!(steel.rho, 7850.0);
///
/// let custom = Material::new(2700.0, 900.0, 237.0).unwrap();  // aluminium
/// assert_eq!(custom.lambda, 237.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Mass density [kg/m^3]
    pub rho: f64,

    /// Specific heat capacity [J/(kg K)]
    pub cp: f64,

    /// Heat conductivity [W/(m K)]
    pub lambda: f64,
}

impl Material {
    /// Create a material, validating that every property is positive
    /// and finite.
    pub fn new(rho: f64, cp: f64, lambda: f64) -> Result<Self, EngineError> {
        for (name, value) in [("rho", rho), ("cp", cp), ("lambda", lambda)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidMaterial { name, value });
            }
        }
        Ok(Self { rho, cp, lambda })
    }

    /// Structural-steel-like default (rho 7850, cp 520, lambda 50).
    pub fn steel() -> Self {
        Self {
            rho: 7850.0,
            cp: 520.0,
            lambda: 50.0,
        }
    }

    /// Thermal diffusivity lambda / (rho cp) [m^2/s].
    pub fn diffusivity(&self) -> f64 {
        self.lambda / (self.rho * self.cp)
    }
}
