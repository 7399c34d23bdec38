//! Error type shared by the solver, evaluator and persistence layers.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while configuring or querying a trajectory.
///
/// A failed operation never leaves the generator half-updated: the blend
/// polynomial stays consistent with the coefficients it was derived from.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    /// Evaluation was requested before the generator was configured.
    #[error("trajectory is not runnable: coefficients have not been configured")]
    NotRunnable,

    /// Pulsation must be finite and strictly positive.
    #[error("invalid pulsation {0}: must be finite and > 0")]
    InvalidPulsation(f64),

    /// A matrix or vector does not have the shape implied by dof / harmonics.
    #[error("{what} has wrong dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },

    /// Sampling step must be finite and strictly positive.
    #[error("invalid sampling step {0}: must be finite and > 0")]
    InvalidStep(f64),

    /// A sampling request would produce more points than allowed.
    #[error("sampling [{start}, {end}] with step {step} exceeds {limit} samples")]
    TooManySamples {
        start: f64,
        end: f64,
        step: f64,
        limit: usize,
    },

    /// A flat parameter vector had the wrong length.
    #[error("parameter vector has length {actual}, expected {expected}")]
    ParameterLength { expected: usize, actual: usize },

    /// A persisted document parsed as JSON but holds an unusable value.
    #[error("invalid trajectory document: field `{field}` {reason}")]
    InvalidDocument { field: &'static str, reason: String },

    /// Malformed JSON or a missing required key.
    #[error("failed to parse trajectory document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TrajectoryError {
    pub(crate) fn dimension(
        what: &'static str,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::DimensionMismatch {
            what,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub(crate) fn document(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrajectoryError>;

/// Reject pulsations the solver cannot divide by.
pub(crate) fn check_pulsation(pulsation: f64) -> Result<()> {
    if pulsation.is_finite() && pulsation > 0.0 {
        Ok(())
    } else {
        Err(TrajectoryError::InvalidPulsation(pulsation))
    }
}
