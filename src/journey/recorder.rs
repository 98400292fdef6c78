//! The recording cycle: credentials, fetch, append, persist.

use super::chart::{self, ChartSettings};
use super::series::{AccountIds, FollowerRecord, Journey};
use super::snapshot;
use crate::credentials::CredentialStore;
use crate::fetchers::FetcherProvider;
use crate::journey_paths::JourneyPaths;
use crate::network::Network;
use anyhow::Result;
use chrono::NaiveDate;
use std::fmt;
use std::path::Path;

/// Why a recording cycle added no row.
#[derive(Debug)]
pub enum RecordError {
    /// The credential file could not be loaded.
    Credentials(anyhow::Error),
    /// A network rejected its credentials.
    CredentialsExpired { network: Network, message: String },
    /// Any other fetch failure.
    FetchFailed { network: Network, message: String },
    /// The new row was fetched but the snapshot could not be written.
    Persist(anyhow::Error),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Credentials(e) => write!(f, "Failed to load credentials: {:#}", e),
            RecordError::CredentialsExpired { network, message } => write!(
                f,
                "{} credentials expired or were rejected: {}",
                network.display_name(),
                message
            ),
            RecordError::FetchFailed { network, message } => write!(
                f,
                "Failed to fetch {} follower count: {}",
                network.display_name(),
                message
            ),
            RecordError::Persist(e) => write!(f, "Failed to save journey: {:#}", e),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Credentials(e) | RecordError::Persist(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// Owns the journey and appends one row per successful recording.
pub struct JourneyRecorder<P: FetcherProvider> {
    journey: Journey,
    paths: JourneyPaths,
    provider: P,
}

impl<P: FetcherProvider> JourneyRecorder<P> {
    pub fn new(journey: Journey, paths: JourneyPaths, provider: P) -> Self {
        Self {
            journey,
            paths,
            provider,
        }
    }

    /// Resumes the saved journey, or starts a fresh one for `default_accounts`.
    pub fn open(paths: JourneyPaths, default_accounts: AccountIds, provider: P) -> Result<Self> {
        let journey = match snapshot::load_journey(&paths.snapshot)? {
            Some(journey) => {
                tracing::debug!(
                    "Loaded journey with {} records from {}",
                    journey.series.len(),
                    paths.snapshot.display()
                );
                if journey.accounts != default_accounts {
                    tracing::debug!("Keeping the accounts stored in the snapshot");
                }
                journey
            }
            None => {
                tracing::info!(
                    "No journey at {}, starting a new one",
                    paths.snapshot.display()
                );
                Journey::new(default_accounts)
            }
        };
        Ok(Self::new(journey, paths, provider))
    }

    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    pub fn paths(&self) -> &JourneyPaths {
        &self.paths
    }

    /// Records today's counts (local date).
    pub fn record_today(&mut self) -> Result<FollowerRecord, RecordError> {
        self.record_on(chrono::Local::now().date_naive())
    }

    /// Fetches every network and appends one row stamped with `date`.
    ///
    /// Any failed fetch aborts before anything is appended. If the snapshot
    /// cannot be written the new row is dropped again.
    pub fn record_on(&mut self, date: NaiveDate) -> Result<FollowerRecord, RecordError> {
        let credentials =
            CredentialStore::load(&self.paths.credentials).map_err(RecordError::Credentials)?;
        for network in Network::ALL {
            if credentials.bundle(network).is_empty() {
                tracing::warn!(
                    "No {} credentials configured, run `journey credentials set {}`",
                    network.display_name(),
                    network
                );
            }
        }
        let fetchers = self.provider.fetchers(&credentials);

        let mut counts = [0u64; 3];
        for (slot, network) in counts.iter_mut().zip(Network::ALL) {
            let fetcher = fetchers.get(network);
            let identifier = self.journey.accounts.get(network);
            *slot = fetcher
                .get_follower_count(identifier)
                .into_result(fetcher.network())
                .inspect_err(|e| tracing::warn!("{}", e))?;
            tracing::debug!("{} {} has {} followers", network, identifier, slot);
        }

        let [twitter, tumblr, instagram] = counts;
        let record = FollowerRecord::new(date, twitter, tumblr, instagram);
        self.journey.series.push(record);

        if let Err(e) = self.save() {
            self.journey.series.pop();
            return Err(RecordError::Persist(e));
        }

        tracing::info!(
            "Recorded {}: twitter={} tumblr={} instagram={}",
            date,
            twitter,
            tumblr,
            instagram
        );
        Ok(record)
    }

    /// Writes the journey snapshot, replacing the previous one.
    pub fn save(&self) -> Result<()> {
        snapshot::save_journey(&self.paths.snapshot, &self.journey)
    }

    /// Renders the series as a PNG chart at `path`.
    pub fn plot(&self, path: &Path, settings: &ChartSettings) -> Result<()> {
        chart::render_chart(&self.journey.series, path, settings)
    }
}

#[cfg(test)]
#[path = "tests/recorder_tests.rs"]
mod tests;
