//! Home-based storage paths for follower-journey persistence.
//!
//! Everything lives under `~/.follower-journey/` unless overridden:
//! - `credentials.json` - API credentials for every network
//! - `journey.json` - the journey snapshot
//!
//! The directory can be moved with `--home` or `FOLLOWER_JOURNEY_HOME`.

use crate::config::StorageConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The name of the journey directory inside the home directory.
const JOURNEY_DIR: &str = ".follower-journey";

/// Environment variable that replaces `~/.follower-journey`.
pub const HOME_ENV_VAR: &str = "FOLLOWER_JOURNEY_HOME";

const CREDENTIALS_FILE: &str = "credentials.json";
const SNAPSHOT_FILE: &str = "journey.json";

/// Returns the journey directory, creating it if needed.
///
/// Precedence: `home_override`, then `FOLLOWER_JOURNEY_HOME`, then
/// `~/.follower-journey/`.
pub fn journey_home_dir(home_override: Option<&Path>) -> Result<PathBuf> {
    let dir = match home_override {
        Some(dir) => dir.to_path_buf(),
        None => match std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .context("Could not determine home directory for journey storage")?
                .join(JOURNEY_DIR),
        },
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create journey directory: {}", dir.display()))?;
    Ok(dir)
}

/// Where the recorder reads and writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyPaths {
    pub credentials: PathBuf,
    pub snapshot: PathBuf,
}

impl JourneyPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            credentials: dir.join(CREDENTIALS_FILE),
            snapshot: dir.join(SNAPSHOT_FILE),
        }
    }

    /// Applies the configured overrides on top of the journey directory.
    pub fn resolve(home_override: Option<&Path>, storage: &StorageConfig) -> Result<Self> {
        let defaults = Self::in_dir(&journey_home_dir(home_override)?);
        Ok(Self {
            credentials: storage
                .credentials
                .clone()
                .unwrap_or(defaults.credentials),
            snapshot: storage.snapshot.clone().unwrap_or(defaults.snapshot),
        })
    }
}

#[cfg(test)]
#[path = "journey_paths_tests.rs"]
mod tests;
