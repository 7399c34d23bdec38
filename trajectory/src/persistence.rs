//! JSON document format for modified Fourier trajectories.
//!
//! ```json
//! {
//!   "dof": 2,
//!   "frequency": 1.0,
//!   "coefficient_number": 2,
//!   "coefficient_a": [0.1, 0.2, 0.3, 0.4],
//!   "coefficient_b": [0.5, 0.6, 0.7, 0.8],
//!   "qinit": [0.0, 0.0]
//! }
//! ```
//!
//! Coefficient arrays are row-major: the `coefficient_number` harmonics of
//! joint 0 come first, then joint 1, and so on. `qinit` is optional on load
//! and defaults to zeros.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::io;

use crate::error::{Result, TrajectoryError};
use crate::fourier::ModifiedFourierTrajectory;

/// On-disk representation of a [`ModifiedFourierTrajectory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDocument {
    pub dof: usize,
    /// Pulsation ω.
    pub frequency: f64,
    pub coefficient_number: usize,
    pub coefficient_a: Vec<f64>,
    pub coefficient_b: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qinit: Option<Vec<f64>>,
}

impl TrajectoryDocument {
    pub fn from_trajectory(trajectory: &ModifiedFourierTrajectory) -> Self {
        Self {
            dof: trajectory.dof(),
            frequency: trajectory.pulsation(),
            coefficient_number: trajectory.harmonics(),
            coefficient_a: row_major(trajectory.coefficients_a()),
            coefficient_b: row_major(trajectory.coefficients_b()),
            qinit: Some(trajectory.qinit().iter().copied().collect()),
        }
    }

    /// Validate every field and build a runnable trajectory.
    pub fn into_trajectory(self) -> Result<ModifiedFourierTrajectory> {
        if self.dof == 0 {
            return Err(TrajectoryError::document("dof", "must be at least 1"));
        }
        if self.coefficient_number == 0 {
            return Err(TrajectoryError::document(
                "coefficient_number",
                "must be at least 1",
            ));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(TrajectoryError::document(
                "frequency",
                format!("is {}, must be finite and > 0", self.frequency),
            ));
        }

        let expected = self.dof * self.coefficient_number;
        check_length("coefficient_a", &self.coefficient_a, expected)?;
        check_length("coefficient_b", &self.coefficient_b, expected)?;

        let qinit = match self.qinit {
            Some(values) => {
                check_length("qinit", &values, self.dof)?;
                DVector::from_vec(values)
            }
            None => DVector::zeros(self.dof),
        };

        let coeff_a = DMatrix::from_row_slice(self.dof, self.coefficient_number, &self.coefficient_a);
        let coeff_b = DMatrix::from_row_slice(self.dof, self.coefficient_number, &self.coefficient_b);
        ModifiedFourierTrajectory::from_coefficients(self.frequency, coeff_a, coeff_b, qinit)
    }

    /// Pretty-printed JSON with every numeric array kept on one line.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, SingleLineArrayFormatter::default());
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn row_major(matrix: &DMatrix<f64>) -> Vec<f64> {
    matrix.transpose().as_slice().to_vec()
}

fn check_length(field: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(TrajectoryError::document(
            field,
            format!("has length {}, expected {}", values.len(), expected),
        ))
    }
}

/// Indents objects two spaces per level but writes arrays inline.
#[derive(Debug, Default)]
struct SingleLineArrayFormatter {
    indent: usize,
    has_value: bool,
}

impl SingleLineArrayFormatter {
    fn newline_indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"\n")?;
        for _ in 0..self.indent {
            writer.write_all(b"  ")?;
        }
        Ok(())
    }
}

impl Formatter for SingleLineArrayFormatter {
    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.indent += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.indent -= 1;
        if self.has_value {
            self.newline_indent(writer)?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if !first {
            writer.write_all(b",")?;
        }
        self.newline_indent(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}
