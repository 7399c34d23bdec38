//! fourier-traj — generate, inspect and sample modified Fourier excitation
//! trajectories from the shell.
//!
//! Usage:
//!   fourier-traj generate --config gen.json --output traj.json
//!   fourier-traj sample traj.json --step 0.01 --format csv

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fourier_trajectory::{JointState, JointTrajectory, ModifiedFourierTrajectory};
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use config::GeneratorConfig;

#[derive(Parser, Debug)]
#[command(name = "fourier-traj")]
#[command(about = "Periodic modified Fourier excitation trajectories")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a random trajectory and save it as JSON.
    Generate {
        /// Generator configuration JSON. Defaults are used if missing.
        #[arg(long, default_value = "./generator.json")]
        config: PathBuf,

        /// Joint count (overrides the config file).
        #[arg(long)]
        dof: Option<usize>,

        /// Harmonics per joint (overrides the config file).
        #[arg(short = 'n', long)]
        harmonics: Option<usize>,

        /// Pulsation in rad/s (overrides the config file).
        #[arg(short = 'w', long)]
        pulsation: Option<f64>,

        /// Seed for reproducible coefficients (overrides the config file).
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the trajectory JSON.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print a summary of a saved trajectory.
    Show { trajectory: PathBuf },

    /// Evaluate a saved trajectory over a time range.
    Sample {
        trajectory: PathBuf,

        #[arg(long, default_value_t = 0.0)]
        start: f64,

        /// End time. Defaults to one period after `start`.
        #[arg(long)]
        end: Option<f64>,

        #[arg(long, default_value_t = 0.01)]
        step: f64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Print the flat parameter vector [ω, vec(A), vec(B)] as JSON.
    Params { trajectory: PathBuf },

    /// Overwrite ω, A and B from a parameter vector file and save the result.
    ApplyParams {
        trajectory: PathBuf,

        /// JSON array produced by `params` (or an optimizer).
        #[arg(long)]
        params: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Serialize)]
struct SampleRow<'a> {
    t: f64,
    position: &'a [f64],
    velocity: &'a [f64],
    acceleration: &'a [f64],
}

fn main() -> Result<()> {
    // Structured JSON logging on stderr; stdout carries data.
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Generate {
            config,
            dof,
            harmonics,
            pulsation,
            seed,
            output,
        } => {
            let mut generator_config =
                GeneratorConfig::load(&config).context("Failed to load generator config")?;
            if let Some(dof) = dof {
                generator_config.dof = dof;
            }
            if let Some(harmonics) = harmonics {
                generator_config.harmonics = harmonics;
            }
            if let Some(pulsation) = pulsation {
                generator_config.pulsation = pulsation;
            }
            if seed.is_some() {
                generator_config.seed = seed;
            }

            let trajectory = build_trajectory(&generator_config)?;
            trajectory
                .save_to_json(&output)
                .with_context(|| format!("Failed to write trajectory to {}", output.display()))?;
        }
        Commands::Show { trajectory } => {
            let trajectory = load(&trajectory)?;
            writeln!(out, "{trajectory}")?;
        }
        Commands::Sample {
            trajectory,
            start,
            end,
            step,
            format,
        } => {
            let mut trajectory = load(&trajectory)?;
            let end = end.unwrap_or(start + trajectory.period_length());
            let samples = trajectory
                .sample(start, end, step)
                .context("Failed to sample trajectory")?;
            tracing::info!(count = samples.len(), start, end, step, "Sampled trajectory");
            match format {
                OutputFormat::Csv => write_csv(&mut out, trajectory.dof(), &samples)?,
                OutputFormat::Json => write_json(&mut out, &samples)?,
            }
        }
        Commands::Params { trajectory } => {
            let trajectory = load(&trajectory)?;
            writeln!(
                out,
                "{}",
                serde_json::to_string(&trajectory.to_parameter_vector())?
            )?;
        }
        Commands::ApplyParams {
            trajectory,
            params,
            output,
        } => {
            let mut trajectory = load(&trajectory)?;
            let contents = std::fs::read_to_string(&params)
                .with_context(|| format!("Failed to read parameter file {}", params.display()))?;
            let values: Vec<f64> =
                serde_json::from_str(&contents).context("Failed to parse parameter vector JSON")?;
            trajectory
                .set_from_parameter_vector(&values)
                .context("Parameter vector rejected")?;
            trajectory
                .save_to_json(&output)
                .with_context(|| format!("Failed to write trajectory to {}", output.display()))?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<ModifiedFourierTrajectory> {
    let mut trajectory = ModifiedFourierTrajectory::default();
    trajectory
        .load_from_json(path)
        .with_context(|| format!("Failed to load trajectory from {}", path.display()))?;
    Ok(trajectory)
}

fn build_trajectory(config: &GeneratorConfig) -> Result<ModifiedFourierTrajectory> {
    config.validate().context("Invalid generator config")?;

    let mut trajectory = match config.seed {
        Some(seed) => ModifiedFourierTrajectory::with_rng(
            config.dof,
            config.harmonics,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => ModifiedFourierTrajectory::with_harmonics(config.dof, config.harmonics),
    };
    trajectory.set_pulsation(config.pulsation)?;
    if let Some(qinit) = &config.qinit {
        trajectory.set_qinit(DVector::from_vec(qinit.clone()))?;
    }

    tracing::info!(
        dof = config.dof,
        harmonics = config.harmonics,
        pulsation = config.pulsation,
        period = trajectory.period_length(),
        "Generated trajectory"
    );
    Ok(trajectory)
}

fn write_csv<W: Write>(out: &mut W, dof: usize, samples: &[(f64, JointState)]) -> Result<()> {
    let mut header = vec!["t".to_string()];
    for prefix in ["q", "dq", "ddq"] {
        header.extend((0..dof).map(|i| format!("{prefix}{i}")));
    }
    writeln!(out, "{}", header.join(","))?;

    for (t, state) in samples {
        let row: Vec<String> = std::iter::once(*t)
            .chain(state.position.iter().copied())
            .chain(state.velocity.iter().copied())
            .chain(state.acceleration.iter().copied())
            .map(|v| v.to_string())
            .collect();
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, samples: &[(f64, JointState)]) -> Result<()> {
    let rows: Vec<SampleRow> = samples
        .iter()
        .map(|(t, state)| SampleRow {
            t: *t,
            position: state.position.as_slice(),
            velocity: state.velocity.as_slice(),
            acceleration: state.acceleration.as_slice(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}
