//! Blend polynomial derivation.
//!
//! A pure Fourier series with period `T = 2π/ω` is already periodic, but it
//! cannot be told where to start. Each joint therefore gets a degree-5
//! polynomial added to it, evaluated on the wrapped local time τ ∈ (0, T].
//! The six coefficients are fixed by six boundary conditions:
//!
//! - position at the start of a period equals `qinit`,
//! - velocity and acceleration at the start of a period are zero,
//! - polynomial value, first and second derivative at τ = T equal those at
//!   τ = 0, so the sum stays continuous across the period seam.
//!
//! Because `T` is always `2π/ω`, every harmonic completes an integer number of
//! cycles per period and the boundary-value solution reduces to the closed
//! forms below.

use nalgebra::{DMatrix, DVector};
use std::f64::consts::TAU;

use crate::error::{check_pulsation, Result, TrajectoryError};

/// Number of blend polynomial coefficients per joint (degree 0..=5).
pub const BLEND_COEFFICIENTS: usize = 6;

/// Period length for a given pulsation.
#[inline]
pub fn period(pulsation: f64) -> f64 {
    TAU / pulsation
}

/// Derive the `dof × 6` blend polynomial from the harmonic coefficients.
///
/// `coeff_a` and `coeff_b` are `dof × N`; column `k - 1` holds harmonic `k`.
/// Column `m` of the result is the coefficient of `τ^m`.
pub fn derive_blend_polynomial(
    coeff_a: &DMatrix<f64>,
    coeff_b: &DMatrix<f64>,
    pulsation: f64,
    qinit: &DVector<f64>,
) -> Result<DMatrix<f64>> {
    check_pulsation(pulsation)?;
    if coeff_a.shape() != coeff_b.shape() {
        return Err(TrajectoryError::dimension(
            "coefficient_b",
            format!("{}x{}", coeff_a.nrows(), coeff_a.ncols()),
            format!("{}x{}", coeff_b.nrows(), coeff_b.ncols()),
        ));
    }
    if qinit.len() != coeff_a.nrows() {
        return Err(TrajectoryError::dimension(
            "qinit",
            coeff_a.nrows(),
            qinit.len(),
        ));
    }

    Ok(blend_polynomial(coeff_a, coeff_b, pulsation, qinit))
}

/// Closed-form derivation for inputs already known to be consistent:
/// equal `dof × N` shapes, `qinit` of length `dof`, and a valid pulsation.
pub(crate) fn blend_polynomial(
    coeff_a: &DMatrix<f64>,
    coeff_b: &DMatrix<f64>,
    pulsation: f64,
    qinit: &DVector<f64>,
) -> DMatrix<f64> {
    let dof = coeff_a.nrows();
    let tf = period(pulsation);
    let tf2 = tf * tf;
    let tf3 = tf2 * tf;
    let tf4 = tf3 * tf;

    let mut poly = DMatrix::zeros(dof, BLEND_COEFFICIENTS);
    poly.set_column(0, qinit);

    for (col, (a_k, b_k)) in coeff_a.column_iter().zip(coeff_b.column_iter()).enumerate() {
        let k = (col + 1) as f64;
        for i in 0..dof {
            let a = a_k[i];
            let b = b_k[i];
            poly[(i, 0)] += b / (pulsation * k);
            poly[(i, 1)] -= a;
            poly[(i, 2)] -= (pulsation / 2.0) * (k * b);
            poly[(i, 3)] += k * b * pulsation / tf + 10.0 * a / tf2;
            poly[(i, 4)] -= k * b * pulsation / (2.0 * tf2) + 15.0 * a / tf3;
            poly[(i, 5)] += 6.0 * a / tf4;
        }
    }

    poly
}
