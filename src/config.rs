use crate::journey::{AccountIds, ChartSettings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyConfig {
    pub accounts: AccountIds,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_path")]
    pub path: PathBuf,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            path: default_chart_path(),
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

impl ChartConfig {
    pub fn settings(&self) -> ChartSettings {
        ChartSettings {
            width: self.width,
            height: self.height,
        }
    }
}

fn default_chart_path() -> PathBuf {
    PathBuf::from("journey.png")
}

fn default_chart_width() -> u32 {
    1000
}

fn default_chart_height() -> u32 {
    600
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout for each API call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    15
}

/// Explicit file locations; `None` means the home-directory default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub credentials: Option<PathBuf>,
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

impl JourneyConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as YAML: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Result<Self> {
        const DEFAULT_JOURNEY_YAML: &str = include_str!("../journey.yaml");

        serde_yaml::from_str(DEFAULT_JOURNEY_YAML)
            .context("Failed to parse embedded journey.yaml")
    }

    /// Loads `path` when given, otherwise the embedded defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::default_config(),
        }
    }

    fn validate(&self) -> Result<()> {
        for (network, id) in [
            ("twitter", &self.accounts.twitter),
            ("tumblr", &self.accounts.tumblr),
            ("instagram", &self.accounts.instagram),
        ] {
            if id.trim().is_empty() {
                anyhow::bail!("accounts.{} must not be empty", network);
            }
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            anyhow::bail!(
                "chart size must be non-zero (got {}x{})",
                self.chart.width,
                self.chart.height
            );
        }

        if self.http.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
