//! Joint-space trajectory capability and its output buffers.
//!
//! Any periodic joint trajectory (the modified Fourier generator is one) is
//! driven through [`JointTrajectory`]: the caller advances it with
//! [`JointTrajectory::update`] and reads back the owned [`JointState`].

use nalgebra::DVector;
use std::path::Path;

use crate::error::{Result, TrajectoryError};

/// Upper bound on the number of points a single [`JointTrajectory::sample`] call produces.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Position, velocity and acceleration of every joint at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct JointState {
    pub position: DVector<f64>,
    pub velocity: DVector<f64>,
    pub acceleration: DVector<f64>,
}

impl JointState {
    /// Zero-filled buffers for `dof` joints.
    pub fn zeros(dof: usize) -> Self {
        Self {
            position: DVector::zeros(dof),
            velocity: DVector::zeros(dof),
            acceleration: DVector::zeros(dof),
        }
    }

    pub fn dof(&self) -> usize {
        self.position.len()
    }
}

/// Trait for joint trajectories (supports swapping generators in tests and tools).
pub trait JointTrajectory {
    /// Number of joints driven by this trajectory.
    fn dof(&self) -> usize;

    /// Whether the trajectory has been configured and may be evaluated.
    fn is_runnable(&self) -> bool;

    /// Evaluate at `time` and store the result in the owned output buffers.
    fn update(&mut self, time: f64) -> Result<()>;

    /// Output buffers written by the last successful [`update`](Self::update).
    fn state(&self) -> &JointState;

    /// Replace the whole configuration with the one stored at `path`.
    fn load_from_json(&mut self, path: &Path) -> Result<()>;

    /// Natural period of the motion in seconds.
    fn period_length(&self) -> f64;

    fn position(&self) -> &DVector<f64> {
        &self.state().position
    }

    fn velocity(&self) -> &DVector<f64> {
        &self.state().velocity
    }

    fn acceleration(&self) -> &DVector<f64> {
        &self.state().acceleration
    }

    /// Evaluate at `start, start + step, ...` up to and including `end`.
    ///
    /// Sample times are computed as `start + i * step` so that long runs do
    /// not accumulate rounding drift. Ranges needing more than
    /// [`MAX_SAMPLES`] points are rejected before anything is evaluated.
    fn sample(&mut self, start: f64, end: f64, step: f64) -> Result<Vec<(f64, JointState)>> {
        if !(step.is_finite() && step > 0.0) {
            return Err(TrajectoryError::InvalidStep(step));
        }
        if end < start {
            return Ok(Vec::new());
        }

        // Half a step of slack so `end` itself is included despite rounding.
        let intervals = ((end - start) / step + 0.5).floor();
        // Negated so a NaN span is rejected too.
        if !(intervals < MAX_SAMPLES as f64) {
            return Err(TrajectoryError::TooManySamples {
                start,
                end,
                step,
                limit: MAX_SAMPLES,
            });
        }
        let count = intervals as usize + 1;
        let mut samples = Vec::with_capacity(count);
        for i in 0..count {
            let t = start + i as f64 * step;
            if t > end + step * 1e-9 {
                break;
            }
            self.update(t)?;
            samples.push((t, self.state().clone()));
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal trajectory moving every joint at unit speed.
    struct Ramp {
        state: JointState,
    }

    impl JointTrajectory for Ramp {
        fn dof(&self) -> usize {
            self.state.dof()
        }

        fn is_runnable(&self) -> bool {
            true
        }

        fn update(&mut self, time: f64) -> Result<()> {
            self.state.position.fill(time);
            self.state.velocity.fill(1.0);
            Ok(())
        }

        fn state(&self) -> &JointState {
            &self.state
        }

        fn load_from_json(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }

        fn period_length(&self) -> f64 {
            f64::INFINITY
        }
    }

    #[test]
    fn test_sample_includes_end_point() {
        let mut ramp = Ramp {
            state: JointState::zeros(2),
        };
        let samples = ramp.sample(0.0, 1.0, 0.1).unwrap();
        assert_eq!(samples.len(), 11);
        let (t_last, last) = samples.last().unwrap();
        assert!((t_last - 1.0).abs() < 1e-12);
        assert!((last.position[1] - 1.0).abs() < 1e-12);
        assert_eq!(ramp.velocity()[0], 1.0);
    }

    #[test]
    fn test_sample_rejects_bad_step() {
        let mut ramp = Ramp {
            state: JointState::zeros(1),
        };
        assert!(matches!(
            ramp.sample(0.0, 1.0, 0.0),
            Err(TrajectoryError::InvalidStep(_))
        ));
        assert!(ramp.sample(0.0, 1.0, f64::NAN).is_err());
        assert!(ramp.sample(1.0, 0.0, 0.1).unwrap().is_empty());
    }

    #[test]
    fn test_sample_rejects_oversized_ranges() {
        let mut ramp = Ramp {
            state: JointState::zeros(1),
        };
        assert!(matches!(
            ramp.sample(0.0, 1.0, 1e-300),
            Err(TrajectoryError::TooManySamples { limit: MAX_SAMPLES, .. })
        ));
        assert!(ramp.sample(0.0, 6.3, 1e-12).is_err());
        assert!(ramp.sample(0.0, f64::INFINITY, 1.0).is_err());
        assert!(ramp.sample(f64::NAN, 1.0, 0.1).is_err());

        // One point past the limit.
        assert!(matches!(
            ramp.sample(0.0, MAX_SAMPLES as f64, 1.0),
            Err(TrajectoryError::TooManySamples { .. })
        ));
    }
}
