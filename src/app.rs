//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - maps CLI arguments into a `RunConfig`
//! - runs the evaluation pipeline
//! - prints the summary and a preview
//! - writes the optional export

use crate::cli::{Cli, Command, SeriesArgs, TideArgs};
use crate::domain::{Epoch, OceanPoleConfig, RunConfig, RunKind};
use crate::error::{TideError, TideResult};
use crate::io::{FieldRecord, write_displacement_csv, write_excitation_csv, write_fields_json};

pub mod pipeline;

use pipeline::{RunOutput, RunResult};

/// Entry point for the `poletide` binary, after logging is set up.
pub fn run(cli: Cli) -> TideResult<()> {
    let config = run_config_from_args(&cli.command)?;
    let output = pipeline::run(&config)?;

    print!("{}", crate::report::format_run_summary(&config, &output));
    print!("{}", crate::report::format_preview(&output, config.preview_rows));

    if let Some(path) = &config.export {
        export(path, &output)?;
        println!("\nWrote {}", path.display());
    }
    Ok(())
}

fn export(path: &std::path::Path, output: &RunOutput) -> TideResult<()> {
    match &output.result {
        RunResult::Excitation(samples) => write_excitation_csv(path, samples),
        RunResult::Potential(fields) => {
            let records: Vec<_> = output
                .times
                .iter()
                .zip(fields)
                .map(|(&epoch, field)| FieldRecord { epoch, time: epoch.to_string(), field })
                .collect();
            write_fields_json(path, &records)
        }
        RunResult::Deformation { sites, displacement } => {
            write_displacement_csv(path, sites, &output.times, displacement)
        }
    }
}

pub fn run_config_from_args(command: &Command) -> TideResult<RunConfig> {
    let (kind, tide_args, series) = match command {
        Command::Excitation(a) => (RunKind::Excitation, &a.tide, &a.series),
        Command::Potential(a) => (RunKind::Potential, &a.tide, &a.series),
        Command::Deformation(a) => (RunKind::Deformation, &a.tide, &a.series),
    };
    let tide = tide_config_from_args(tide_args)?;
    let (start, end) = span_from_args(series)?;

    let mut config = RunConfig {
        kind,
        tide,
        eop_path: series.eop.clone(),
        start,
        end,
        step_seconds: series.step,
        max_degree: None,
        min_degree: 0,
        gm: None,
        radius: None,
        sites_path: None,
        love_path: None,
        preview_rows: series.rows,
        export: series.export.clone(),
    };
    match command {
        Command::Potential(a) => {
            config.max_degree = a.max_degree;
            config.min_degree = a.min_degree;
            config.gm = a.gm;
            config.radius = a.radius;
        }
        Command::Deformation(a) => {
            config.sites_path = Some(a.sites.clone());
            config.love_path = Some(a.love.clone());
        }
        Command::Excitation(_) => {}
    }
    Ok(config)
}

/// JSON configuration (if any) with explicit flags layered on top.
pub fn tide_config_from_args(args: &TideArgs) -> TideResult<OceanPoleConfig> {
    let mut config = match &args.config {
        Some(path) => OceanPoleConfig::from_json_file(path)
            .map_err(|e| e.context(format!("failed to load tide configuration '{}'", path.display())))?,
        None => OceanPoleConfig {
            inputfile_ocean_pole: None,
            inputfile_mean_pole: None,
            ..OceanPoleConfig::new("", "")
        },
    };

    if let Some(p) = &args.coefficients {
        config.inputfile_ocean_pole = Some(p.clone());
    }
    if let Some(p) = &args.mean_pole {
        config.inputfile_mean_pole = Some(p.clone());
    }
    if let Some(d) = args.model_min_degree {
        config.min_degree = d;
    }
    if args.model_max_degree.is_some() {
        config.max_degree = args.model_max_degree;
    }
    if let Some(g) = args.gamma_real {
        config.gamma_real = g;
    }
    if let Some(g) = args.gamma_imaginary {
        config.gamma_imaginary = g;
    }
    if let Some(f) = args.factor {
        config.factor = f;
    }

    config.validate()?;
    Ok(config)
}

fn span_from_args(series: &SeriesArgs) -> TideResult<(Epoch, Epoch)> {
    let start = Epoch::parse(&series.start)?;
    let end = match &series.end {
        Some(text) => Epoch::parse(text)?,
        None => start,
    };
    if !(series.step.is_finite() && series.step > 0.0) {
        return Err(TideError::configuration(format!("--step must be positive, got {}", series.step)));
    }
    Ok((start, end))
}
