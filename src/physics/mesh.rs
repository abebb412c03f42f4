//! 1D mesh of the slab
//!
//! The slab of length L is split into N linear elements with N+1 nodes.
//! Node positions are uniform; the element size `dx = L/N` scales both
//! the mass and the stiffness matrices during assembly.

use nalgebra::DVector;

use crate::error::EngineError;

/// 1D discretization of the slab. Immutable once constructed.
///
/// # Example
///
/// ```rust
/// use therm_rs::physics::Mesh;
///
/// let mesh = Mesh::new(1.0, 10).unwrap();
/// assert_eq!(mesh.nodes(), 11);
/// assert!((mesh.dx() - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    length: f64,
    elements: usize,
    /// Node x-positions, from 0 to `length` inclusive.
    x: DVector<f64>,
}

impl Mesh {
    /// Create a uniform mesh. Fails when `elements < 1` or `length <= 0`.
    pub fn new(length: f64, elements: usize) -> Result<Self, EngineError> {
        if elements < 1 {
            return Err(EngineError::InvalidMesh {
                reason: format!("need at least 1 element, got {elements}"),
            });
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(EngineError::InvalidMesh {
                reason: format!("length must be positive and finite, got {length}"),
            });
        }

        let dx = length / elements as f64;
        let x = DVector::from_fn(elements + 1, |i, _| i as f64 * dx);
        Ok(Self {
            length,
            elements,
            x,
        })
    }

    /// Slab length L [m].
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of elements N.
    pub fn elements(&self) -> usize {
        self.elements
    }

    /// Number of nodes N + 1.
    pub fn nodes(&self) -> usize {
        self.elements + 1
    }

    /// Element size dx = L/N [m].
    pub fn dx(&self) -> f64 {
        self.length / self.elements as f64
    }

    /// Node positions.
    pub fn x(&self) -> &DVector<f64> {
        &self.x
    }

    /// Linearly interpolate a nodal field at position `x`.
    ///
    /// Positions outside the slab clamp to the nearest boundary node,
    /// matching how sensor positions at (or marginally past) the surface
    /// are handled.
    pub fn interpolate(&self, values: &DVector<f64>, x: f64) -> f64 {
        debug_assert_eq!(values.len(), self.nodes());

        if x <= 0.0 {
            return values[0];
        }
        if x >= self.length {
            return values[values.len() - 1];
        }

        let dx = self.dx();
        let cell = ((x / dx) as usize).min(self.elements - 1);
        let t = (x - self.x[cell]) / dx;
        values[cell] * (1.0 - t) + values[cell + 1] * t
    }
}
