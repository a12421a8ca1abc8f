//! Command-line parsing for the ocean pole tide tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! tide model; `app` maps the parsed arguments into a plain `RunConfig`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "poletide", version, about = "Ocean pole tide potential and site deformation")]
pub struct Cli {
    /// Log progress to stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the pole tide excitation (m1, m2) and admittance weights per epoch.
    Excitation(ExcitationArgs),
    /// Synthesize the ocean pole tide potential coefficients per epoch.
    Potential(PotentialArgs),
    /// Compute ocean pole tide loading displacements at a list of sites.
    Deformation(DeformationArgs),
}

/// Tide model options. `--config` loads a JSON file; explicit flags override it.
#[derive(Debug, Args, Clone, Default)]
pub struct TideArgs {
    /// JSON configuration (`inputfileOceanPole`, `inputfileMeanPole`, `minDegree`, ...).
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Ocean pole tide coefficient file.
    #[arg(long, value_name = "FILE")]
    pub coefficients: Option<PathBuf>,

    /// Mean pole model (JSON).
    #[arg(long, value_name = "JSON")]
    pub mean_pole: Option<PathBuf>,

    /// Lowest degree taken from the coefficient file.
    #[arg(long)]
    pub model_min_degree: Option<usize>,

    /// Highest degree taken from the coefficient file.
    #[arg(long)]
    pub model_max_degree: Option<usize>,

    #[arg(long, allow_negative_numbers = true)]
    pub gamma_real: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub gamma_imaginary: Option<f64>,

    /// Scale factor applied to the result (-1 subtracts the tide).
    #[arg(long, allow_negative_numbers = true)]
    pub factor: Option<f64>,
}

/// Time span and Earth orientation series.
#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    /// Earth orientation CSV (`mjd,xp,yp[,dut1,lod]`, pole in arcsec).
    #[arg(long, value_name = "CSV")]
    pub eop: PathBuf,

    /// First epoch (`YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `mjd:<value>`).
    #[arg(long)]
    pub start: String,

    /// Last epoch (inclusive); defaults to `--start`.
    #[arg(long)]
    pub end: Option<String>,

    /// Sampling interval in seconds.
    #[arg(long, default_value_t = 86_400.0)]
    pub step: f64,

    /// Rows shown in the terminal preview.
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Write the full result to this file (CSV, or JSON for `potential`).
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ExcitationArgs {
    #[command(flatten)]
    pub tide: TideArgs,

    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Debug, Args, Clone)]
pub struct PotentialArgs {
    #[command(flatten)]
    pub tide: TideArgs,

    #[command(flatten)]
    pub series: SeriesArgs,

    /// Truncate or zero-pad the output to this degree.
    #[arg(long)]
    pub max_degree: Option<usize>,

    /// Zero the output below this degree.
    #[arg(long, default_value_t = 0)]
    pub min_degree: usize,

    /// Output geocentric gravitational constant (m³/s²).
    #[arg(long)]
    pub gm: Option<f64>,

    /// Output reference radius (m).
    #[arg(long)]
    pub radius: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct DeformationArgs {
    #[command(flatten)]
    pub tide: TideArgs,

    #[command(flatten)]
    pub series: SeriesArgs,

    /// Site list CSV (`id,x,y,z[,gravity]`).
    #[arg(long, value_name = "CSV")]
    pub sites: PathBuf,

    /// Load Love numbers (`n h l` per line).
    #[arg(long, value_name = "FILE")]
    pub love: PathBuf,
}
