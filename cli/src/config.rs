//! Generator configuration loader — reads the JSON used by `generate`.

use anyhow::{ensure, Context, Result};
use fourier_trajectory::{DEFAULT_HARMONICS, DEFAULT_PULSATION};
use serde::Deserialize;
use std::path::Path;

/// Settings for a freshly generated trajectory, loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_dof")]
    pub dof: usize,

    #[serde(default = "default_harmonics")]
    pub harmonics: usize,

    #[serde(default = "default_pulsation")]
    pub pulsation: f64,

    /// Start-of-period joint positions. Zero when absent.
    #[serde(default)]
    pub qinit: Option<Vec<f64>>,

    /// Seed for reproducible coefficients. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_dof() -> usize {
    6
}

fn default_harmonics() -> usize {
    DEFAULT_HARMONICS
}

fn default_pulsation() -> f64 {
    DEFAULT_PULSATION
}

impl GeneratorConfig {
    /// Load configuration from a JSON file. Falls back to defaults if the file is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(path).context("Failed to read generator config file")?;

        let config: GeneratorConfig =
            serde_json::from_str(&contents).context("Failed to parse generator config JSON")?;

        Ok(config)
    }

    /// Check values the trajectory constructor would otherwise panic or fail on.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.dof > 0, "dof must be at least 1");
        ensure!(self.harmonics > 0, "harmonics must be at least 1");
        ensure!(
            self.pulsation.is_finite() && self.pulsation > 0.0,
            "pulsation must be finite and > 0, got {}",
            self.pulsation
        );
        if let Some(qinit) = &self.qinit {
            ensure!(
                qinit.len() == self.dof,
                "qinit has {} entries but dof is {}",
                qinit.len(),
                self.dof
            );
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dof: default_dof(),
            harmonics: default_harmonics(),
            pulsation: default_pulsation(),
            qinit: None,
            seed: None,
        }
    }
}
