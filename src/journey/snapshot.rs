//! Versioned JSON persistence for a [`Journey`].
//!
//! - **Location**: `~/.follower-journey/journey.json` unless configured otherwise.
//! - **Versioned format**: `version` is checked on load so an older binary
//!   refuses a file written by a newer one instead of misreading it.

use super::series::{AccountIds, FollowerRecord, Journey, TimeSeries};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current snapshot format version.
/// Increment this when making breaking changes to the snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneySnapshot {
    pub version: u32,
    /// RFC3339 time of the save
    pub saved_at: String,
    pub accounts: AccountIds,
    pub records: Vec<FollowerRecord>,
}

impl JourneySnapshot {
    pub fn new(journey: &Journey) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            accounts: journey.accounts.clone(),
            records: journey.series.records().to_vec(),
        }
    }

    pub fn into_journey(self) -> Journey {
        Journey {
            accounts: self.accounts,
            series: TimeSeries::from_records(self.records),
        }
    }
}

/// Writes the journey to `path` through a temp file, replacing any previous
/// snapshot.
pub fn save_journey(path: &Path, journey: &Journey) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(&JourneySnapshot::new(journey))
        .context("Failed to serialize journey snapshot")?;

    fs::write(&temp_path, &content)
        .with_context(|| format!("Failed to write temp snapshot file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Loads the journey at `path`, or `None` when no snapshot exists yet.
pub fn load_journey(path: &Path) -> Result<Option<Journey>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

    // Read the version first so a newer format gets a clear message rather
    // than a field mismatch.
    let header: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot file as JSON: {}", path.display()))?;
    let version = header["version"].as_u64().unwrap_or(0);
    if version > u64::from(SNAPSHOT_VERSION) {
        anyhow::bail!(
            "Snapshot version {} is newer than supported version {}. Please upgrade follower-journey.",
            version,
            SNAPSHOT_VERSION
        );
    }

    let snapshot: JourneySnapshot = serde_json::from_value(header)
        .with_context(|| format!("Invalid journey snapshot: {}", path.display()))?;

    Ok(Some(snapshot.into_journey()))
}

#[cfg(test)]
#[path = "tests/snapshot_tests.rs"]
mod tests;
