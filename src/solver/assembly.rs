//! Finite-element matrix assembly
//!
//! First-order continuous Galerkin elements on a uniform 1D mesh yield
//! two tridiagonal matrices:
//!
//! - **Mass matrix M** (heat capacity coupling):
//!   `dx * rho * cp * [1/6, 4/6, 1/6]`
//! - **Stiffness matrix K** (conductive coupling):
//!   `(lambda / dx) * [-1, 2, -1]`
//!
//! The two corner diagonal entries of K are halved before the time loop
//! ever runs: the boundary nodes only see half an element, which is what
//! exposes them to the Neumann flux on the left and the Robin exchange
//! on the right.
//!
//! Assembly is a pure function of mesh and material. For physically
//! valid inputs both matrices are symmetric and diagonally dominant, so
//! the Thomas solve downstream cannot hit a zero pivot.

use crate::error::EngineError;
use crate::physics::{Material, Mesh};
use crate::solver::tridiagonal::Tridiagonal;

/// Build the mass and stiffness matrices for `mesh` and `material`.
///
/// Returns `(mass, stiffness)` with the boundary half-weighting already
/// applied to the stiffness corners.
pub fn assemble(mesh: &Mesh, material: &Material) -> Result<(Tridiagonal, Tridiagonal), EngineError> {
    // Both types validate on construction, but assembly is also reachable
    // with values built elsewhere, so re-check the physical ranges here.
    if mesh.elements() < 1 || mesh.length() <= 0.0 {
        return Err(EngineError::InvalidMesh {
            reason: format!(
                "cannot assemble on {} elements of total length {}",
                mesh.elements(),
                mesh.length()
            ),
        });
    }
    for (name, value) in [
        ("rho", material.rho),
        ("cp", material.cp),
        ("lambda", material.lambda),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(EngineError::InvalidMaterial { name, value });
        }
    }

    let n = mesh.nodes();
    let dx = mesh.dx();

    let mut mass = Tridiagonal::from_stencil(n, 1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0);
    mass.scale(dx * material.rho * material.cp);

    let mut stiffness = Tridiagonal::from_stencil(n, -1.0, 2.0, -1.0);
    stiffness.scale(material.lambda / dx);

    // Boundary half-weighting: each boundary node owns half an element.
    stiffness.scale_diag(0, 0.5);
    stiffness.scale_diag(n - 1, 0.5);

    Ok((mass, stiffness))
}
