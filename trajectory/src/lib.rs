//! Periodic joint-space excitation trajectories for robot identification.
//!
//! A [`ModifiedFourierTrajectory`] drives every joint with a truncated
//! Fourier series plus a degree-5 blend polynomial. The result is exactly
//! periodic with period `2π/ω`, starts each period at a chosen position with
//! zero velocity and acceleration, and is continuous in position, velocity and
//! acceleration across period boundaries.
//!
//! ```
//! use fourier_trajectory::{JointTrajectory, ModifiedFourierTrajectory};
//!
//! let mut traj = ModifiedFourierTrajectory::with_harmonics(2, 4);
//! traj.set_pulsation(0.5)?;
//! traj.update(1.25)?;
//! assert_eq!(traj.position().len(), 2);
//! # Ok::<(), fourier_trajectory::TrajectoryError>(())
//! ```

pub mod error;
pub mod evaluator;
pub mod fourier;
pub mod joint_trajectory;
pub mod persistence;
pub mod solver;

pub use error::{Result, TrajectoryError};
pub use fourier::{ModifiedFourierTrajectory, DEFAULT_HARMONICS, DEFAULT_PULSATION};
pub use joint_trajectory::{JointState, JointTrajectory, MAX_SAMPLES};
pub use persistence::TrajectoryDocument;
