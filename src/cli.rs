use crate::config::JourneyConfig;
use crate::credentials::{masked, prompt_for_bundle, CredentialStore};
use crate::fetchers::HttpFetcherProvider;
use crate::journey::snapshot::load_journey;
use crate::journey::{chart, FollowerRecord, Journey, JourneyRecorder, RecordError};
use crate::journey_paths::JourneyPaths;
use crate::network::Network;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FOLLOWER_JOURNEY_GIT_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "journey")]
#[command(about = "Track follower counts on Twitter, Tumblr and Instagram over time")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// YAML configuration file (defaults to the built-in journey.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage directory (defaults to $FOLLOWER_JOURNEY_HOME or ~/.follower-journey)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch today's counts and append them to the journey (default)
    Record {
        /// Render the chart after recording
        #[arg(long)]
        plot: bool,
    },
    /// Render the chart from the saved journey
    Plot {
        /// Output PNG (defaults to chart.path from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print every recorded row
    History,
    /// Manage API credentials
    #[command(subcommand)]
    Credentials(CredentialsCommand),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CredentialsCommand {
    /// Enter new credentials for one network
    Set {
        /// twitter, tumblr or instagram
        network: String,
    },
    /// Print stored credentials with secrets masked
    Show,
}

pub fn run(cli: Cli) -> Result<()> {
    let config = JourneyConfig::load_or_default(cli.config.as_deref())?;
    let paths = JourneyPaths::resolve(cli.home.as_deref(), &config.storage)?;
    tracing::debug!(
        "Using credentials {} and snapshot {}",
        paths.credentials.display(),
        paths.snapshot.display()
    );

    match cli.command.unwrap_or(Command::Record { plot: false }) {
        Command::Record { plot } => record(&config, paths, plot),
        Command::Plot { output } => {
            let output = output.unwrap_or_else(|| config.chart.path.clone());
            plot(&config, &paths, output)
        }
        Command::History => {
            let journey = require_journey(&paths)?;
            if journey.series.is_empty() {
                println!("No records yet.");
            } else {
                write_history(&journey, &mut io::stdout().lock())?;
            }
            Ok(())
        }
        Command::Credentials(CredentialsCommand::Set { network }) => {
            let stdin = io::stdin();
            set_credentials(&paths, &network, &mut stdin.lock(), &mut io::stdout())
        }
        Command::Credentials(CredentialsCommand::Show) => {
            let store = CredentialStore::load(&paths.credentials)?;
            write_credentials(&store, &mut io::stdout().lock())?;
            Ok(())
        }
    }
}

fn record(config: &JourneyConfig, paths: JourneyPaths, plot: bool) -> Result<()> {
    let provider = HttpFetcherProvider::new(config.http.timeout());
    let mut recorder = JourneyRecorder::open(paths, config.accounts.clone(), provider)?;

    let record = match recorder.record_today() {
        Ok(record) => record,
        Err(RecordError::CredentialsExpired { network, message }) => anyhow::bail!(
            "{} credentials expired or were rejected: {}\nRun `journey credentials set {}` to enter new ones.",
            network.display_name(),
            message,
            network
        ),
        Err(e) => return Err(e.into()),
    };
    println!("{}", format_record(&record));
    tracing::debug!(
        "Journey has {} records in {}",
        recorder.journey().series.len(),
        recorder.paths().snapshot.display()
    );

    if plot {
        recorder.plot(&config.chart.path, &config.chart.settings())?;
        println!("Chart written to {}", config.chart.path.display());
    }
    Ok(())
}

fn plot(config: &JourneyConfig, paths: &JourneyPaths, output: PathBuf) -> Result<()> {
    let journey = require_journey(paths)?;
    chart::render_chart(&journey.series, &output, &config.chart.settings())?;
    println!("Chart written to {}", output.display());
    Ok(())
}

fn require_journey(paths: &JourneyPaths) -> Result<Journey> {
    load_journey(&paths.snapshot)?.with_context(|| {
        format!(
            "No journey recorded yet at {}. Run `journey record` first.",
            paths.snapshot.display()
        )
    })
}

fn set_credentials<R: io::BufRead, W: Write>(
    paths: &JourneyPaths,
    network_name: &str,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let network: Network = network_name.parse()?;
    let mut store = CredentialStore::load(&paths.credentials)?;
    let fields = prompt_for_bundle(&store.bundle(network), input, output)?;
    store.update(network_name, &fields)?;
    store.save(&paths.credentials)?;
    writeln!(
        output,
        "Saved {} credentials to {}",
        network.display_name(),
        paths.credentials.display()
    )?;
    Ok(())
}

fn format_record(record: &FollowerRecord) -> String {
    format!(
        "{}  {}  twitter {}  tumblr {}  instagram {}",
        record.date,
        record.date.format("%a"),
        record.twitter,
        record.tumblr,
        record.instagram
    )
}

fn write_history<W: Write>(journey: &Journey, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:<12}{:>8}{:>10}{:>10}{:>11}",
        "date", "weekday", "twitter", "tumblr", "instagram"
    )?;
    for record in journey.series.records() {
        writeln!(
            out,
            "{:<12}{:>8}{:>10}{:>10}{:>11}",
            record.date.to_string(),
            record.weekday,
            record.twitter,
            record.tumblr,
            record.instagram
        )?;
    }
    Ok(())
}

fn write_credentials<W: Write>(store: &CredentialStore, out: &mut W) -> io::Result<()> {
    for network in Network::ALL {
        writeln!(out, "[{}]", network)?;
        for (field, value) in store.bundle(network).fields() {
            writeln!(out, "  {}: {}", field, masked(value))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
