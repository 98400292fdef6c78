//! Typed credential bundles, one shape per network.

use crate::network::{InvalidNetworkError, Network};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// OAuth1 user-context keys for the Twitter v1.1 API.
///
/// `bearer_token` is not needed for user-context calls but is kept so the
/// credential file holds everything the developer portal hands out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub bearer_token: String,
    pub access_token: String,
    pub access_token_secret: String,
}

/// OAuth1 consumer and token pair for the Tumblr v2 API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TumblrCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub oauth_token: String,
    pub oauth_token_secret: String,
}

/// Graph API token and the numeric id of the page that owns the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstagramCredentials {
    pub access_token: String,
    pub page_id: String,
}

const TWITTER_FIELDS: &[&str] = &[
    "consumer_key",
    "consumer_secret",
    "bearer_token",
    "access_token",
    "access_token_secret",
];
const TUMBLR_FIELDS: &[&str] = &[
    "consumer_key",
    "consumer_secret",
    "oauth_token",
    "oauth_token_secret",
];
const INSTAGRAM_FIELDS: &[&str] = &["access_token", "page_id"];

/// Field names a network's bundle carries, in file order.
pub fn field_names(network: Network) -> &'static [&'static str] {
    match network {
        Network::Twitter => TWITTER_FIELDS,
        Network::Tumblr => TUMBLR_FIELDS,
        Network::Instagram => INSTAGRAM_FIELDS,
    }
}

/// Credentials for exactly one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialBundle {
    Twitter(TwitterCredentials),
    Tumblr(TumblrCredentials),
    Instagram(InstagramCredentials),
}

impl CredentialBundle {
    /// A bundle with every known field present and empty.
    pub fn empty(network: Network) -> Self {
        match network {
            Network::Twitter => Self::Twitter(TwitterCredentials::default()),
            Network::Tumblr => Self::Tumblr(TumblrCredentials::default()),
            Network::Instagram => Self::Instagram(InstagramCredentials::default()),
        }
    }

    pub fn network(&self) -> Network {
        match self {
            Self::Twitter(_) => Network::Twitter,
            Self::Tumblr(_) => Network::Tumblr,
            Self::Instagram(_) => Network::Instagram,
        }
    }

    /// Ordered `(field, value)` pairs.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Twitter(c) => vec![
                ("consumer_key", c.consumer_key.as_str()),
                ("consumer_secret", c.consumer_secret.as_str()),
                ("bearer_token", c.bearer_token.as_str()),
                ("access_token", c.access_token.as_str()),
                ("access_token_secret", c.access_token_secret.as_str()),
            ],
            Self::Tumblr(c) => vec![
                ("consumer_key", c.consumer_key.as_str()),
                ("consumer_secret", c.consumer_secret.as_str()),
                ("oauth_token", c.oauth_token.as_str()),
                ("oauth_token_secret", c.oauth_token_secret.as_str()),
            ],
            Self::Instagram(c) => vec![
                ("access_token", c.access_token.as_str()),
                ("page_id", c.page_id.as_str()),
            ],
        }
    }

    /// True when no field has been filled in.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }

    /// Builds and validates a bundle from named values.
    ///
    /// Fields not mentioned stay empty. Names outside the network's schema
    /// are rejected.
    pub fn from_fields(
        network: Network,
        values: &BTreeMap<String, String>,
    ) -> Result<Self, CredentialError> {
        let mut bundle = Self::empty(network);
        for (name, value) in values {
            if !bundle.set_field(name, value.clone()) {
                return Err(CredentialError::UnknownField {
                    network,
                    field: name.clone(),
                });
            }
        }
        bundle.validate()?;
        Ok(bundle)
    }

    /// Checks the value constraints of the network's schema.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if let Self::Instagram(c) = self {
            if !c.page_id.chars().all(|ch| ch.is_ascii_digit()) {
                return Err(CredentialError::InvalidField {
                    network: Network::Instagram,
                    field: "page_id".to_string(),
                    reason: "must be numeric".to_string(),
                });
            }
        }
        Ok(())
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match self {
            Self::Twitter(c) => match name {
                "consumer_key" => &mut c.consumer_key,
                "consumer_secret" => &mut c.consumer_secret,
                "bearer_token" => &mut c.bearer_token,
                "access_token" => &mut c.access_token,
                "access_token_secret" => &mut c.access_token_secret,
                _ => return false,
            },
            Self::Tumblr(c) => match name {
                "consumer_key" => &mut c.consumer_key,
                "consumer_secret" => &mut c.consumer_secret,
                "oauth_token" => &mut c.oauth_token,
                "oauth_token_secret" => &mut c.oauth_token_secret,
                _ => return false,
            },
            Self::Instagram(c) => match name {
                "access_token" => &mut c.access_token,
                "page_id" => &mut c.page_id,
                _ => return false,
            },
        };
        *slot = value;
        true
    }
}

/// Hides all but the last four characters of a secret.
pub fn masked(value: &str) -> String {
    if value.is_empty() {
        return "(empty)".to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Errors raised when editing or validating credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The network name is not one we track.
    InvalidNetwork(InvalidNetworkError),
    /// A field name outside the network's schema.
    UnknownField { network: Network, field: String },
    /// A known field whose value breaks the schema.
    InvalidField {
        network: Network,
        field: String,
        reason: String,
    },
}

impl From<InvalidNetworkError> for CredentialError {
    fn from(err: InvalidNetworkError) -> Self {
        Self::InvalidNetwork(err)
    }
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNetwork(err) => write!(f, "{}", err),
            Self::UnknownField { network, field } => {
                write!(f, "Unknown {} credential field: {}", network, field)
            }
            Self::InvalidField {
                network,
                field,
                reason,
            } => write!(f, "Invalid {} credential {}: {}", network, field, reason),
        }
    }
}

impl std::error::Error for CredentialError {}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
