//! Tridiagonal matrices and the Thomas solve
//!
//! # Why a dedicated type
//!
//! Both finite-element matrices of the 1D conduction problem (mass M and
//! stiffness K) are tridiagonal, and the theta-step system
//! `A = M + dt*theta*K` stays tridiagonal. Storing three bands and
//! solving with the Thomas algorithm is O(n) per step and avoids every
//! bit of generic sparse-solver overhead, which matters because the
//! inverse estimator re-runs forward bursts thousands of times.
//!
//! # Algorithm
//!
//! The Thomas algorithm is Gaussian elimination specialised to the three
//! bands: a forward sweep normalises each row against the previous pivot,
//! a back substitution recovers the solution. It is stable for the
//! diagonally dominant systems produced by physically valid inputs; a
//! vanishing or non-finite pivot is reported as
//! [`EngineError::SingularSystem`] instead of a panic, because a
//! degenerate system here means bad run parameters, not a programming
//! error.

use nalgebra::DVector;

use crate::error::EngineError;

/// Square tridiagonal matrix stored as three bands.
///
/// `sub[i]` couples row `i` to column `i-1` (entry 0 unused),
/// `sup[i]` couples row `i` to column `i+1` (last entry unused).
#[derive(Debug, Clone, PartialEq)]
pub struct Tridiagonal {
    sub: DVector<f64>,
    diag: DVector<f64>,
    sup: DVector<f64>,
}

impl Tridiagonal {
    /// Build from band vectors. All three must have length `n`.
    pub fn from_bands(sub: DVector<f64>, diag: DVector<f64>, sup: DVector<f64>) -> Self {
        assert_eq!(sub.len(), diag.len());
        assert_eq!(sup.len(), diag.len());
        Self { sub, diag, sup }
    }

    /// Constant-band matrix: every row is `[sub, diag, sup]`, truncated
    /// at the corners. This is exactly the shape of the FE mass and
    /// stiffness stencils.
    pub fn from_stencil(n: usize, sub: f64, diag: f64, sup: f64) -> Self {
        assert!(n > 0, "matrix size must be at least 1");
        let mut sub_band = DVector::from_element(n, sub);
        let mut sup_band = DVector::from_element(n, sup);
        sub_band[0] = 0.0;
        sup_band[n - 1] = 0.0;
        Self {
            sub: sub_band,
            diag: DVector::from_element(n, diag),
            sup: sup_band,
        }
    }

    /// Matrix size (n rows, n columns).
    pub fn n(&self) -> usize {
        self.diag.len()
    }

    /// Diagonal entry accessor.
    pub fn diag(&self, i: usize) -> f64 {
        self.diag[i]
    }

    /// Add `value` to the diagonal entry `i`. Used for the implicit
    /// Robin contribution and for the boundary half-weighting.
    pub fn add_to_diag(&mut self, i: usize, value: f64) {
        self.diag[i] += value;
    }

    /// Scale the diagonal entry `i` by `factor`.
    pub fn scale_diag(&mut self, i: usize, factor: f64) {
        self.diag[i] *= factor;
    }

    /// Multiply every band by `factor`, in place.
    pub fn scale(&mut self, factor: f64) {
        self.sub *= factor;
        self.diag *= factor;
        self.sup *= factor;
    }

    /// `self + factor * other`, producing a new matrix. This is the
    /// `M + dt*theta*K` assembly of the theta step.
    pub fn add_scaled(&self, other: &Tridiagonal, factor: f64) -> Tridiagonal {
        debug_assert_eq!(self.n(), other.n());
        Tridiagonal {
            sub: &self.sub + &other.sub * factor,
            diag: &self.diag + &other.diag * factor,
            sup: &self.sup + &other.sup * factor,
        }
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, v: &DVector<f64>) -> DVector<f64> {
        let n = self.n();
        debug_assert_eq!(v.len(), n);

        let mut out = DVector::zeros(n);
        for i in 0..n {
            let mut acc = self.diag[i] * v[i];
            if i > 0 {
                acc += self.sub[i] * v[i - 1];
            }
            if i + 1 < n {
                acc += self.sup[i] * v[i + 1];
            }
            out[i] = acc;
        }
        out
    }

    /// Solve `self * x = b` with the Thomas algorithm.
    ///
    /// `step` only labels the error context; the algorithm itself does
    /// not depend on it.
    pub fn solve(&self, b: &DVector<f64>, step: usize) -> Result<DVector<f64>, EngineError> {
        let n = self.n();
        debug_assert_eq!(b.len(), n);

        let mut sup_prime = DVector::zeros(n);
        let mut rhs_prime = DVector::zeros(n);

        // Forward sweep
        let pivot = self.diag[0];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(EngineError::SingularSystem { step, row: 0 });
        }
        sup_prime[0] = self.sup[0] / pivot;
        rhs_prime[0] = b[0] / pivot;

        for i in 1..n {
            let den = self.diag[i] - self.sub[i] * sup_prime[i - 1];
            if den == 0.0 || !den.is_finite() {
                return Err(EngineError::SingularSystem { step, row: i });
            }
            if i + 1 < n {
                sup_prime[i] = self.sup[i] / den;
            }
            rhs_prime[i] = (b[i] - self.sub[i] * rhs_prime[i - 1]) / den;
        }

        // Back substitution
        let mut x = DVector::zeros(n);
        x[n - 1] = rhs_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = rhs_prime[i] - sup_prime[i] * x[i + 1];
        }

        Ok(x)
    }
}
