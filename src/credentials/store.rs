//! Credential file persistence.

use super::types::{
    CredentialBundle, CredentialError, InstagramCredentials, TumblrCredentials,
    TwitterCredentials,
};
use crate::network::Network;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Every network's credentials, keyed by network name on disk.
///
/// Networks missing from the file load as empty bundles, so a store always
/// carries all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStore {
    #[serde(default)]
    twitter: TwitterCredentials,
    #[serde(default)]
    tumblr: TumblrCredentials,
    #[serde(default)]
    instagram: InstagramCredentials,
}

impl CredentialStore {
    /// Loads the credential file, or an all-empty store if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(
                "No credential file at {}, starting with empty credentials",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read credential file: {}", path.display()))?;
        let store: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse credential file: {}", path.display()))?;

        for network in Network::ALL {
            store
                .bundle(network)
                .validate()
                .with_context(|| format!("Invalid credential file: {}", path.display()))?;
        }

        Ok(store)
    }

    /// Writes every bundle back to `path`, replacing the previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create credential directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize credentials")?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp credential file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
        Ok(())
    }

    /// Replaces one network's bundle with the given field values.
    ///
    /// On error nothing is changed.
    pub fn update(
        &mut self,
        network_name: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<(), CredentialError> {
        let network: Network = network_name.parse()?;
        let bundle = CredentialBundle::from_fields(network, values)?;
        self.set_bundle(bundle);
        Ok(())
    }

    pub fn twitter(&self) -> &TwitterCredentials {
        &self.twitter
    }

    pub fn tumblr(&self) -> &TumblrCredentials {
        &self.tumblr
    }

    pub fn instagram(&self) -> &InstagramCredentials {
        &self.instagram
    }

    pub fn bundle(&self, network: Network) -> CredentialBundle {
        match network {
            Network::Twitter => CredentialBundle::Twitter(self.twitter.clone()),
            Network::Tumblr => CredentialBundle::Tumblr(self.tumblr.clone()),
            Network::Instagram => CredentialBundle::Instagram(self.instagram.clone()),
        }
    }

    fn set_bundle(&mut self, bundle: CredentialBundle) {
        match bundle {
            CredentialBundle::Twitter(c) => self.twitter = c,
            CredentialBundle::Tumblr(c) => self.tumblr = c,
            CredentialBundle::Instagram(c) => self.instagram = c,
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
