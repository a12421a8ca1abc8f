use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use ocean_pole_tide::cli::Cli;
use ocean_pole_tide::error::format_chain;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for tables.
    let default = if cli.verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_writer(io::stderr).with_env_filter(filter).with_target(false).init();

    match ocean_pole_tide::app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", format_chain(&err));
            ExitCode::from(err.exit_code())
        }
    }
}
