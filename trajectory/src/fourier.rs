//! Modified Fourier excitation trajectory.
//!
//! Each joint follows a truncated Fourier series plus a degree-5 blend
//! polynomial (see [`crate::solver`]), which makes the motion exactly periodic,
//! start every period at `qinit` at rest, and stay continuous in position,
//! velocity and acceleration across period boundaries.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use std::fmt;
use std::path::Path;

use crate::error::{check_pulsation, Result, TrajectoryError};
use crate::evaluator;
use crate::joint_trajectory::{JointState, JointTrajectory};
use crate::persistence::TrajectoryDocument;
use crate::solver::{self, derive_blend_polynomial, BLEND_COEFFICIENTS};

/// Harmonic order used when only the joint count is given.
pub const DEFAULT_HARMONICS: usize = 6;

/// Pulsation used for freshly generated trajectories (period 2π).
pub const DEFAULT_PULSATION: f64 = 1.0;

/// Periodic joint trajectory built from Fourier harmonics and a blend polynomial.
///
/// The blend polynomial is never set directly; every mutator re-derives it
/// before returning, so it always matches the current coefficients,
/// pulsation and initial position. A mutator that fails leaves the
/// trajectory exactly as it was.
#[derive(Debug, Clone)]
pub struct ModifiedFourierTrajectory {
    dof: usize,
    runnable: bool,
    state: JointState,

    pulsation: f64,
    harmonics: usize,
    /// Sine amplitudes, `dof × harmonics`.
    coeff_a: DMatrix<f64>,
    /// Cosine amplitudes, `dof × harmonics`.
    coeff_b: DMatrix<f64>,
    /// Blend polynomial, `dof × 6`, column `m` multiplies `τ^m`.
    blend: DMatrix<f64>,
    qinit: DVector<f64>,
    number_of_parameters: usize,
}

impl Default for ModifiedFourierTrajectory {
    /// An unconfigured trajectory; evaluating it fails with
    /// [`TrajectoryError::NotRunnable`] until coefficients are loaded.
    fn default() -> Self {
        Self {
            dof: 0,
            runnable: false,
            state: JointState::zeros(0),
            pulsation: DEFAULT_PULSATION,
            harmonics: 0,
            coeff_a: DMatrix::zeros(0, 0),
            coeff_b: DMatrix::zeros(0, 0),
            blend: DMatrix::zeros(0, BLEND_COEFFICIENTS),
            qinit: DVector::zeros(0),
            number_of_parameters: 0,
        }
    }
}

impl ModifiedFourierTrajectory {
    /// Random trajectory with [`DEFAULT_HARMONICS`] harmonics per joint.
    ///
    /// # Panics
    /// Panics if `dof` is zero.
    pub fn new(dof: usize) -> Self {
        Self::with_harmonics(dof, DEFAULT_HARMONICS)
    }

    /// Random trajectory seeded from the thread-local generator.
    ///
    /// # Panics
    /// Panics if `dof` or `harmonics` is zero.
    pub fn with_harmonics(dof: usize, harmonics: usize) -> Self {
        Self::with_rng(dof, harmonics, &mut rand::thread_rng())
    }

    /// Random trajectory with coefficients drawn uniformly from `[0, 1)`.
    ///
    /// Pulsation is [`DEFAULT_PULSATION`] and `qinit` is zero. The generator is
    /// only used here and is not kept.
    ///
    /// # Panics
    /// Panics if `dof` or `harmonics` is zero.
    pub fn with_rng<R: Rng + ?Sized>(dof: usize, harmonics: usize, rng: &mut R) -> Self {
        assert!(dof > 0, "trajectory needs at least one joint");
        assert!(harmonics > 0, "trajectory needs at least one harmonic");

        // Same draw order as a row-by-row fill: a then b for each (joint, harmonic).
        let mut coeff_a = DMatrix::zeros(dof, harmonics);
        let mut coeff_b = DMatrix::zeros(dof, harmonics);
        for i in 0..dof {
            for k in 0..harmonics {
                coeff_a[(i, k)] = rng.gen::<f64>();
                coeff_b[(i, k)] = rng.gen::<f64>();
            }
        }

        // Shapes match and the default pulsation is valid, so no checks needed.
        let qinit = DVector::zeros(dof);
        let blend = solver::blend_polynomial(&coeff_a, &coeff_b, DEFAULT_PULSATION, &qinit);
        let mut trajectory = Self::default();
        trajectory.install(DEFAULT_PULSATION, coeff_a, coeff_b, qinit, blend);
        trajectory
    }

    /// Trajectory from explicit coefficients.
    ///
    /// `coeff_a` and `coeff_b` must both be `dof × N` with `dof, N > 0`, and
    /// `qinit` must have `dof` entries.
    pub fn from_coefficients(
        pulsation: f64,
        coeff_a: DMatrix<f64>,
        coeff_b: DMatrix<f64>,
        qinit: DVector<f64>,
    ) -> Result<Self> {
        if coeff_a.nrows() == 0 {
            return Err(TrajectoryError::dimension("dof", "> 0", 0));
        }
        if coeff_a.ncols() == 0 {
            return Err(TrajectoryError::dimension("coefficient_number", "> 0", 0));
        }
        let mut trajectory = Self::default();
        trajectory.commit(pulsation, coeff_a, coeff_b, qinit)?;
        Ok(trajectory)
    }

    /// Re-derive the blend polynomial for the given inputs and install them.
    ///
    /// Nothing is modified unless derivation succeeds.
    fn commit(
        &mut self,
        pulsation: f64,
        coeff_a: DMatrix<f64>,
        coeff_b: DMatrix<f64>,
        qinit: DVector<f64>,
    ) -> Result<()> {
        let blend = derive_blend_polynomial(&coeff_a, &coeff_b, pulsation, &qinit)?;
        self.install(pulsation, coeff_a, coeff_b, qinit, blend);
        Ok(())
    }

    /// Install inputs together with the blend polynomial derived from them.
    fn install(
        &mut self,
        pulsation: f64,
        coeff_a: DMatrix<f64>,
        coeff_b: DMatrix<f64>,
        qinit: DVector<f64>,
        blend: DMatrix<f64>,
    ) {
        let dof = coeff_a.nrows();
        let harmonics = coeff_a.ncols();

        if self.state.dof() != dof {
            self.state = JointState::zeros(dof);
        }
        self.dof = dof;
        self.harmonics = harmonics;
        self.pulsation = pulsation;
        self.coeff_a = coeff_a;
        self.coeff_b = coeff_b;
        self.qinit = qinit;
        self.blend = blend;
        self.number_of_parameters = 2 * harmonics * dof + 1;
        self.runnable = true;

        tracing::debug!(
            dof,
            harmonics,
            pulsation,
            period = self.period_length(),
            "Blend polynomial re-derived"
        );
    }

    // ── Accessors ──

    pub fn dof(&self) -> usize {
        self.dof
    }

    pub fn is_runnable(&self) -> bool {
        self.runnable
    }

    /// Harmonic order N.
    pub fn harmonics(&self) -> usize {
        self.harmonics
    }

    pub fn pulsation(&self) -> f64 {
        self.pulsation
    }

    /// Period `T = 2π / ω`.
    pub fn period_length(&self) -> f64 {
        solver::period(self.pulsation)
    }

    pub fn coefficients_a(&self) -> &DMatrix<f64> {
        &self.coeff_a
    }

    pub fn coefficients_b(&self) -> &DMatrix<f64> {
        &self.coeff_b
    }

    /// Derived `dof × 6` blend polynomial.
    pub fn blend_polynomial(&self) -> &DMatrix<f64> {
        &self.blend
    }

    pub fn qinit(&self) -> &DVector<f64> {
        &self.qinit
    }

    /// Length of the parameter vector: `2 · N · dof + 1`.
    pub fn number_of_parameters(&self) -> usize {
        self.number_of_parameters
    }

    // ── Mutators ──

    pub fn set_pulsation(&mut self, pulsation: f64) -> Result<()> {
        self.ensure_runnable()?;
        check_pulsation(pulsation)?;
        self.commit(
            pulsation,
            self.coeff_a.clone(),
            self.coeff_b.clone(),
            self.qinit.clone(),
        )
    }

    /// Set the position every period starts from.
    pub fn set_qinit(&mut self, qinit: DVector<f64>) -> Result<()> {
        self.ensure_runnable()?;
        if qinit.len() != self.dof {
            return Err(TrajectoryError::dimension("qinit", self.dof, qinit.len()));
        }
        self.commit(
            self.pulsation,
            self.coeff_a.clone(),
            self.coeff_b.clone(),
            qinit,
        )
    }

    /// Replace both coefficient matrices; their column count becomes the new
    /// harmonic order.
    pub fn set_coefficients(&mut self, coeff_a: DMatrix<f64>, coeff_b: DMatrix<f64>) -> Result<()> {
        self.ensure_runnable()?;
        if coeff_a.nrows() != self.dof {
            return Err(TrajectoryError::dimension(
                "coefficient_a rows",
                self.dof,
                coeff_a.nrows(),
            ));
        }
        if coeff_a.ncols() == 0 {
            return Err(TrajectoryError::dimension("coefficient_number", "> 0", 0));
        }
        self.commit(self.pulsation, coeff_a, coeff_b, self.qinit.clone())
    }

    /// Change the harmonic order and resize both coefficient matrices with it.
    ///
    /// Existing harmonics are kept; added ones start at zero amplitude, so
    /// growing the order does not change the motion.
    pub fn resize_harmonics(&mut self, harmonics: usize) -> Result<()> {
        self.ensure_runnable()?;
        if harmonics == 0 {
            return Err(TrajectoryError::dimension("coefficient_number", "> 0", 0));
        }
        let coeff_a = self.coeff_a.clone().resize(self.dof, harmonics, 0.0);
        let coeff_b = self.coeff_b.clone().resize(self.dof, harmonics, 0.0);
        self.commit(self.pulsation, coeff_a, coeff_b, self.qinit.clone())
    }

    // ── Parameter vector ──

    /// Flatten `(ω, A, B)` as `[ω, vec(A), vec(B)]`.
    ///
    /// Matrices are stored column-major: all joints for harmonic 1, then all
    /// joints for harmonic 2, and so on. This differs from the row-major
    /// layout of the JSON document.
    pub fn to_parameter_vector(&self) -> Vec<f64> {
        let mut params = Vec::with_capacity(self.number_of_parameters);
        params.push(self.pulsation);
        params.extend_from_slice(self.coeff_a.as_slice());
        params.extend_from_slice(self.coeff_b.as_slice());
        params
    }

    /// Exact inverse of [`to_parameter_vector`](Self::to_parameter_vector).
    ///
    /// Dimensions (dof, N) are kept; only values change.
    pub fn set_from_parameter_vector(&mut self, params: &[f64]) -> Result<()> {
        self.ensure_runnable()?;
        if params.len() != self.number_of_parameters {
            return Err(TrajectoryError::ParameterLength {
                expected: self.number_of_parameters,
                actual: params.len(),
            });
        }

        let block = self.dof * self.harmonics;
        let pulsation = params[0];
        check_pulsation(pulsation)?;
        let coeff_a = DMatrix::from_column_slice(self.dof, self.harmonics, &params[1..1 + block]);
        let coeff_b = DMatrix::from_column_slice(self.dof, self.harmonics, &params[1 + block..]);
        self.commit(pulsation, coeff_a, coeff_b, self.qinit.clone())
    }

    // ── Evaluation ──

    /// Position, velocity and acceleration of every joint at time `t`.
    pub fn evaluate(&self, t: f64) -> Result<JointState> {
        self.ensure_runnable()?;
        Ok(evaluator::evaluate(
            &self.coeff_a,
            &self.coeff_b,
            &self.blend,
            self.pulsation,
            t,
        ))
    }

    fn ensure_runnable(&self) -> Result<()> {
        if self.runnable {
            Ok(())
        } else {
            Err(TrajectoryError::NotRunnable)
        }
    }

    // ── Persistence ──

    /// Parse a persisted document and replace the whole configuration.
    pub fn load_from_json_str(&mut self, json: &str) -> Result<()> {
        let document: TrajectoryDocument = serde_json::from_str(json)?;
        *self = document.into_trajectory()?;
        Ok(())
    }

    /// Serialize to the persisted document format.
    pub fn to_json_string(&self) -> Result<String> {
        self.ensure_runnable()?;
        TrajectoryDocument::from_trajectory(self).to_json_string()
    }

    pub fn save_to_json(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json_string()?;
        json.push('\n');
        std::fs::write(path, json).map_err(|source| TrajectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            dof = self.dof,
            harmonics = self.harmonics,
            "Saved trajectory to {}",
            path.display()
        );
        Ok(())
    }
}

impl JointTrajectory for ModifiedFourierTrajectory {
    fn dof(&self) -> usize {
        self.dof
    }

    fn is_runnable(&self) -> bool {
        self.runnable
    }

    fn update(&mut self, time: f64) -> Result<()> {
        self.ensure_runnable()?;
        evaluator::evaluate_into(
            &self.coeff_a,
            &self.coeff_b,
            &self.blend,
            self.pulsation,
            time,
            &mut self.state,
        );
        Ok(())
    }

    fn state(&self) -> &JointState {
        &self.state
    }

    fn load_from_json(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path).map_err(|source| TrajectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_json_str(&contents)?;
        tracing::info!(
            dof = self.dof,
            harmonics = self.harmonics,
            pulsation = self.pulsation,
            "Loaded trajectory from {}",
            path.display()
        );
        Ok(())
    }

    fn period_length(&self) -> f64 {
        ModifiedFourierTrajectory::period_length(self)
    }
}

impl fmt::Display for ModifiedFourierTrajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Modified Fourier trajectory")?;
        writeln!(f, "dof: {}", self.dof)?;
        writeln!(f, "pulsation: {} (period {:.6})", self.pulsation, self.period_length())?;
        writeln!(f, "harmonics: {}", self.harmonics)?;
        writeln!(f, "qinit: {}", self.qinit.transpose())?;
        writeln!(f, "coefficients a:{}", self.coeff_a)?;
        writeln!(f, "coefficients b:{}", self.coeff_b)?;
        write!(f, "blend polynomial:{}", self.blend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    fn seeded(dof: usize, harmonics: usize, seed: u64) -> ModifiedFourierTrajectory {
        ModifiedFourierTrajectory::with_rng(dof, harmonics, &mut StdRng::seed_from_u64(seed))
    }

    fn assert_states_close(a: &JointState, b: &JointState, tol: f64) {
        for i in 0..a.dof() {
            assert!(
                (a.position[i] - b.position[i]).abs() < tol,
                "position[{}]: {} vs {}",
                i,
                a.position[i],
                b.position[i]
            );
            assert!(
                (a.velocity[i] - b.velocity[i]).abs() < tol,
                "velocity[{}]: {} vs {}",
                i,
                a.velocity[i],
                b.velocity[i]
            );
            assert!(
                (a.acceleration[i] - b.acceleration[i]).abs() < tol,
                "acceleration[{}]: {} vs {}",
                i,
                a.acceleration[i],
                b.acceleration[i]
            );
        }
    }

    #[test]
    fn test_random_construction() {
        let traj = seeded(3, 4, 7);
        assert!(traj.is_runnable());
        assert_eq!(traj.dof(), 3);
        assert_eq!(traj.harmonics(), 4);
        assert_eq!(traj.pulsation(), DEFAULT_PULSATION);
        assert_eq!(traj.qinit(), &DVector::zeros(3));
        assert_eq!(traj.blend_polynomial().shape(), (3, BLEND_COEFFICIENTS));
        assert!(traj
            .coefficients_a()
            .iter()
            .chain(traj.coefficients_b().iter())
            .all(|&c| (0.0..1.0).contains(&c)));

        // Same seed, same coefficients.
        let again = seeded(3, 4, 7);
        assert_eq!(traj.coefficients_a(), again.coefficients_a());
        assert_eq!(traj.coefficients_b(), again.coefficients_b());

        assert_eq!(ModifiedFourierTrajectory::new(2).harmonics(), DEFAULT_HARMONICS);
    }

    #[test]
    fn test_random_construction_derives_consistent_blend() {
        let traj = seeded(4, 3, 12);
        let expected = derive_blend_polynomial(
            traj.coefficients_a(),
            traj.coefficients_b(),
            traj.pulsation(),
            traj.qinit(),
        )
        .unwrap();
        assert_eq!(traj.blend_polynomial(), &expected);
        assert_eq!(traj.number_of_parameters(), 25);
        assert_eq!(traj.state().dof(), 4);
    }

    #[test]
    fn test_number_of_parameters() {
        for dof in 1..5 {
            for n in 1..5 {
                let traj = seeded(dof, n, 1);
                assert_eq!(traj.number_of_parameters(), 2 * n * dof + 1);
                assert_eq!(traj.to_parameter_vector().len(), 2 * n * dof + 1);
            }
        }
    }

    #[test]
    fn test_single_harmonic_scenario() {
        let traj = ModifiedFourierTrajectory::from_coefficients(
            1.0,
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::zeros(1, 1),
            DVector::zeros(1),
        )
        .unwrap();
        assert!((traj.period_length() - 2.0 * PI).abs() < 1e-15);

        let end = traj.evaluate(2.0 * PI).unwrap();
        assert!(end.position[0].abs() < 1e-9, "position {}", end.position[0]);
        assert!(end.velocity[0].abs() < 1e-9, "velocity {}", end.velocity[0]);
        assert!(end.acceleration[0].abs() < 1e-9, "acceleration {}", end.acceleration[0]);

        let tf = 2.0 * PI;
        let expected = PI.sin() - PI + 10.0 / tf.powi(2) * PI.powi(3) - 15.0 / tf.powi(3) * PI.powi(4)
            + 6.0 / tf.powi(4) * PI.powi(5);
        let mid = traj.evaluate(PI).unwrap();
        assert!((mid.position[0] - expected).abs() < 1e-10);
    }

    #[test]
    fn test_boundary_conditions() {
        let mut traj = seeded(4, 5, 11);
        traj.set_pulsation(0.8).unwrap();
        let qinit = DVector::from_vec(vec![0.5, -1.0, 0.0, 2.0]);
        traj.set_qinit(qinit.clone()).unwrap();

        let tf = traj.period_length();
        for periods in [0.0, 1.0, 3.0, -2.0] {
            let state = traj.evaluate(periods * tf).unwrap();
            for i in 0..4 {
                assert!((state.position[i] - qinit[i]).abs() < 1e-8, "joint {}", i);
                assert!(state.velocity[i].abs() < 1e-8, "joint {}", i);
                assert!(state.acceleration[i].abs() < 1e-8, "joint {}", i);
            }
        }
    }

    #[test]
    fn test_periodicity() {
        let mut traj = seeded(3, 6, 3);
        traj.set_pulsation(2.5).unwrap();
        let tf = traj.period_length();

        for i in 0..40 {
            let t = -3.0 + i as f64 * 0.173;
            let here = traj.evaluate(t).unwrap();
            let next = traj.evaluate(t + tf).unwrap();
            let later = traj.evaluate(t + 4.0 * tf).unwrap();
            assert_states_close(&here, &next, 1e-8);
            assert_states_close(&here, &later, 1e-8);
        }
    }

    #[test]
    fn test_continuity_across_seams() {
        let traj = seeded(2, 3, 5);
        let tf = traj.period_length();
        let eps = 1e-6;

        for k in -1..4 {
            let seam = k as f64 * tf;
            let before = traj.evaluate(seam - eps).unwrap();
            let after = traj.evaluate(seam + eps).unwrap();
            assert_states_close(&before, &after, 1e3 * eps);
        }

        // Away from seams too.
        for i in 1..20 {
            let t = i as f64 * 0.31;
            let before = traj.evaluate(t).unwrap();
            let after = traj.evaluate(t + eps).unwrap();
            assert_states_close(&before, &after, 1e3 * eps);
        }
    }

    #[test]
    fn test_parameter_vector_layout() {
        let traj = ModifiedFourierTrajectory::from_coefficients(
            2.0,
            DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]),
            DMatrix::from_row_slice(2, 2, &[5.0, 6.0, 7.0, 8.0]),
            DVector::zeros(2),
        )
        .unwrap();

        // Harmonic index slowest, joint index fastest.
        assert_eq!(
            traj.to_parameter_vector(),
            vec![2.0, 1.0, 3.0, 2.0, 4.0, 5.0, 7.0, 6.0, 8.0]
        );
    }

    #[test]
    fn test_parameter_vector_round_trip() {
        let source = seeded(3, 4, 21);
        let mut target = seeded(3, 4, 99);
        target.set_qinit(source.qinit().clone()).unwrap();

        target
            .set_from_parameter_vector(&source.to_parameter_vector())
            .unwrap();
        assert_eq!(target.pulsation(), source.pulsation());
        assert_eq!(target.coefficients_a(), source.coefficients_a());
        assert_eq!(target.coefficients_b(), source.coefficients_b());
        assert_eq!(target.blend_polynomial(), source.blend_polynomial());

        for t in [0.0, 0.5, 3.3, -7.1] {
            assert_eq!(target.evaluate(t).unwrap(), source.evaluate(t).unwrap());
        }
    }

    #[test]
    fn test_failed_mutations_leave_state_unchanged() {
        let mut traj = seeded(2, 3, 8);
        let before = traj.clone();

        assert!(matches!(
            traj.set_pulsation(0.0),
            Err(TrajectoryError::InvalidPulsation(_))
        ));
        assert!(traj.set_pulsation(-1.0).is_err());
        assert!(matches!(
            traj.set_from_parameter_vector(&[1.0, 2.0]),
            Err(TrajectoryError::ParameterLength { expected: 13, actual: 2 })
        ));

        let mut params = traj.to_parameter_vector();
        params[0] = -3.0;
        params[1] = 42.0;
        assert!(traj.set_from_parameter_vector(&params).is_err());

        assert!(traj.set_qinit(DVector::zeros(3)).is_err());
        assert!(traj
            .set_coefficients(DMatrix::zeros(2, 3), DMatrix::zeros(2, 2))
            .is_err());
        assert!(traj.resize_harmonics(0).is_err());

        assert_eq!(traj.pulsation(), before.pulsation());
        assert_eq!(traj.coefficients_a(), before.coefficients_a());
        assert_eq!(traj.coefficients_b(), before.coefficients_b());
        assert_eq!(traj.blend_polynomial(), before.blend_polynomial());
        assert_eq!(traj.qinit(), before.qinit());
    }

    #[test]
    fn test_unconfigured_trajectory_is_rejected() {
        let mut traj = ModifiedFourierTrajectory::default();
        assert!(!traj.is_runnable());
        assert!(matches!(traj.evaluate(0.0), Err(TrajectoryError::NotRunnable)));
        assert!(matches!(traj.update(1.0), Err(TrajectoryError::NotRunnable)));
        assert!(traj.to_json_string().is_err());
        assert!(traj.set_from_parameter_vector(&[1.0]).is_err());
        assert!(traj.set_pulsation(2.0).is_err());
        assert!(!traj.is_runnable());
    }

    #[test]
    fn test_pulsation_change_rederives_blend() {
        let mut traj = seeded(2, 2, 4);
        let old_blend = traj.blend_polynomial().clone();
        traj.set_pulsation(3.0).unwrap();
        assert_ne!(traj.blend_polynomial(), &old_blend);
        assert!((traj.period_length() - 2.0 * PI / 3.0).abs() < 1e-15);

        let start = traj.evaluate(0.0).unwrap();
        assert!(start.position.iter().all(|p| p.abs() < 1e-9));
    }

    #[test]
    fn test_resize_harmonics_keeps_motion() {
        let mut traj = seeded(2, 3, 6);
        let before = traj.evaluate(1.234).unwrap();

        traj.resize_harmonics(5).unwrap();
        assert_eq!(traj.harmonics(), 5);
        assert_eq!(traj.coefficients_a().shape(), (2, 5));
        assert_eq!(traj.coefficients_b()[(1, 4)], 0.0);
        assert_eq!(traj.number_of_parameters(), 21);
        assert_states_close(&before, &traj.evaluate(1.234).unwrap(), 1e-9);

        traj.resize_harmonics(1).unwrap();
        assert_eq!(traj.coefficients_a().shape(), (2, 1));
        assert_eq!(traj.number_of_parameters(), 5);
    }

    #[test]
    fn test_set_coefficients_changes_order() {
        let mut traj = seeded(2, 3, 6);
        let a = DMatrix::from_row_slice(2, 1, &[0.25, 0.5]);
        let b = DMatrix::from_row_slice(2, 1, &[0.75, 1.0]);
        traj.set_coefficients(a.clone(), b).unwrap();

        assert_eq!(traj.harmonics(), 1);
        assert_eq!(traj.coefficients_a(), &a);
        assert_eq!(traj.number_of_parameters(), 5);
        assert!((traj.blend_polynomial()[(0, 1)] + 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_update_writes_buffers() {
        let mut traj = seeded(3, 2, 10);
        traj.update(0.7).unwrap();
        let expected = traj.evaluate(0.7).unwrap();
        assert_eq!(traj.state(), &expected);
        assert_eq!(JointTrajectory::position(&traj), &expected.position);
        assert_eq!(JointTrajectory::velocity(&traj), &expected.velocity);
        assert_eq!(JointTrajectory::acceleration(&traj), &expected.acceleration);
        assert_eq!(JointTrajectory::period_length(&traj), traj.period_length());
    }

    #[test]
    fn test_display_summary() {
        let traj = seeded(1, 2, 0);
        let text = traj.to_string();
        assert!(text.contains("harmonics: 2"));
        assert!(text.contains("blend polynomial"));
    }
}
