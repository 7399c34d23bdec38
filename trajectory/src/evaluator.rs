//! Time-domain evaluation of a modified Fourier trajectory.

use nalgebra::DMatrix;

use crate::joint_trajectory::JointState;
use crate::solver::period;

/// Fold `t` into the window `(0, period]` used by the blend polynomial.
///
/// `t = 0` maps to `period`, not to 0: the polynomial is continuous across the
/// seam, so the end-of-period phase yields the same values as the start.
#[inline]
pub fn wrapped_time(t: f64, period: f64) -> f64 {
    t - ((t / period).ceil() - 1.0) * period
}

/// Evaluate harmonic sum plus blend polynomial at `t`.
///
/// The harmonic terms use raw `t`; the polynomial uses the wrapped time.
pub fn evaluate(
    coeff_a: &DMatrix<f64>,
    coeff_b: &DMatrix<f64>,
    blend: &DMatrix<f64>,
    pulsation: f64,
    t: f64,
) -> JointState {
    let mut state = JointState::zeros(coeff_a.nrows());
    evaluate_into(coeff_a, coeff_b, blend, pulsation, t, &mut state);
    state
}

/// Same as [`evaluate`] but writes into caller-owned buffers.
///
/// `out` must already be sized for `coeff_a.nrows()` joints.
pub fn evaluate_into(
    coeff_a: &DMatrix<f64>,
    coeff_b: &DMatrix<f64>,
    blend: &DMatrix<f64>,
    pulsation: f64,
    t: f64,
    out: &mut JointState,
) {
    let tau = wrapped_time(t, period(pulsation));

    for i in 0..coeff_a.nrows() {
        let mut pos = 0.0;
        let mut vel = 0.0;
        let mut acc = 0.0;

        for col in 0..coeff_a.ncols() {
            let wk = pulsation * (col + 1) as f64;
            let a = coeff_a[(i, col)];
            let b = coeff_b[(i, col)];
            let (s, c) = (wk * t).sin_cos();

            pos += a / wk * s - b / wk * c;
            vel += a * c + b * s;
            acc += -a * wk * s + b * wk * c;
        }

        let p = |m: usize| blend[(i, m)];
        pos += p(0) + tau * (p(1) + tau * (p(2) + tau * (p(3) + tau * (p(4) + tau * p(5)))));
        vel += p(1)
            + tau * (2.0 * p(2) + tau * (3.0 * p(3) + tau * (4.0 * p(4) + tau * 5.0 * p(5))));
        acc += 2.0 * p(2) + tau * (6.0 * p(3) + tau * (12.0 * p(4) + tau * 20.0 * p(5)));

        out.position[i] = pos;
        out.velocity[i] = vel;
        out.acceleration[i] = acc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::derive_blend_polynomial;
    use nalgebra::DVector;
    use std::f64::consts::PI;

    #[test]
    fn test_wrapped_time_maps_zero_to_period() {
        let tf = 2.0 * PI;
        assert_eq!(wrapped_time(0.0, tf), tf);
        assert_eq!(wrapped_time(tf, tf), tf);
        assert!((wrapped_time(1.0, tf) - 1.0).abs() < 1e-12);
        assert!((wrapped_time(tf + 1.0, tf) - 1.0).abs() < 1e-12);
        assert!((wrapped_time(-1.0, tf) - (tf - 1.0)).abs() < 1e-12);
        assert!((wrapped_time(-tf, tf) - tf).abs() < 1e-12);
    }

    #[test]
    fn test_wrapped_time_stays_in_window() {
        let tf = 0.75;
        for i in -200..200 {
            let t = i as f64 * 0.0137 + 0.001;
            let tau = wrapped_time(t, tf);
            assert!(tau > 0.0 && tau <= tf + 1e-12, "t={} tau={}", t, tau);
        }
    }

    #[test]
    fn test_hand_computed_midpoint() {
        // One joint, one sine harmonic, omega = 1, evaluated at t = pi.
        let a = DMatrix::from_element(1, 1, 1.0);
        let b = DMatrix::zeros(1, 1);
        let blend = derive_blend_polynomial(&a, &b, 1.0, &DVector::zeros(1)).unwrap();
        let state = evaluate(&a, &b, &blend, 1.0, PI);

        let tf = 2.0 * PI;
        let tau = PI;
        let p3 = 10.0 / tf.powi(2);
        let p4 = -15.0 / tf.powi(3);
        let p5 = 6.0 / tf.powi(4);

        let pos = PI.sin() - tau + p3 * tau.powi(3) + p4 * tau.powi(4) + p5 * tau.powi(5);
        let vel = PI.cos() - 1.0 + 3.0 * p3 * tau.powi(2) + 4.0 * p4 * tau.powi(3)
            + 5.0 * p5 * tau.powi(4);
        let acc = -PI.sin() + 6.0 * p3 * tau + 12.0 * p4 * tau.powi(2) + 20.0 * p5 * tau.powi(3);

        assert!((state.position[0] - pos).abs() < 1e-10, "{} vs {}", state.position[0], pos);
        assert!((state.velocity[0] - vel).abs() < 1e-10, "{} vs {}", state.velocity[0], vel);
        assert!((state.acceleration[0] - acc).abs() < 1e-10);
    }

    #[test]
    fn test_evaluate_into_matches_evaluate() {
        let a = DMatrix::from_row_slice(2, 2, &[0.1, 0.2, 0.3, 0.4]);
        let b = DMatrix::from_row_slice(2, 2, &[0.5, 0.6, 0.7, 0.8]);
        let blend = derive_blend_polynomial(&a, &b, 3.0, &DVector::zeros(2)).unwrap();

        let mut out = JointState::zeros(2);
        evaluate_into(&a, &b, &blend, 3.0, 0.42, &mut out);
        assert_eq!(out, evaluate(&a, &b, &blend, 3.0, 0.42));
    }
}
