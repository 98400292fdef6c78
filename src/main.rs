mod cli;
mod config;
mod credentials;
mod fetchers;
mod journey;
mod journey_paths;
mod network;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter directives, e.g. `debug` or `info,ureq=warn`.
const LOG_ENV_VAR: &str = "FOLLOWER_JOURNEY_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = cli::Cli::parse();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
