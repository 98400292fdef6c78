//! The closed set of social networks whose followers are tracked.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A tracked social network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Twitter,
    Tumblr,
    Instagram,
}

impl Network {
    /// All networks, in recording order.
    pub const ALL: [Network; 3] = [Network::Twitter, Network::Tumblr, Network::Instagram];

    /// Name used in the credential file, snapshot file and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Twitter => "twitter",
            Network::Tumblr => "tumblr",
            Network::Instagram => "instagram",
        }
    }

    /// Human-facing name for charts and terminal output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Network::Twitter => "Twitter",
            Network::Tumblr => "Tumblr",
            Network::Instagram => "Instagram",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = InvalidNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Network::ALL
            .into_iter()
            .find(|network| network.as_str() == wanted)
            .ok_or_else(|| InvalidNetworkError {
                name: s.to_string(),
            })
    }
}

/// A network name that is not one of [`Network::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNetworkError {
    pub name: String,
}

impl Display for InvalidNetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid social media website '{}' (expected one of: twitter, tumblr, instagram)",
            self.name
        )
    }
}

impl std::error::Error for InvalidNetworkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_networks() {
        assert_eq!("twitter".parse::<Network>().unwrap(), Network::Twitter);
        assert_eq!("Tumblr".parse::<Network>().unwrap(), Network::Tumblr);
        assert_eq!(" instagram ".parse::<Network>().unwrap(), Network::Instagram);
    }

    #[test]
    fn test_parse_unknown_network() {
        let err = "myspace".parse::<Network>().unwrap_err();
        assert_eq!(err.name, "myspace");
        assert!(err.to_string().contains("myspace"));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Network::Instagram).unwrap();
        assert_eq!(json, "\"instagram\"");
        let back: Network = serde_json::from_str("\"tumblr\"").unwrap();
        assert_eq!(back, Network::Tumblr);
    }
}
