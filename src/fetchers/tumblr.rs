//! Tumblr v2 blog follower counts (OAuth1).

use super::http::{self, JsonReply};
use super::oauth1::{self, OAuth1Keys};
use super::{FetchOutcome, FollowerFetcher};
use crate::credentials::TumblrCredentials;
use crate::network::Network;

pub const TUMBLR_API_BASE: &str = "https://api.tumblr.com";

pub struct TumblrFetcher {
    agent: ureq::Agent,
    credentials: TumblrCredentials,
    base_url: String,
}

impl TumblrFetcher {
    pub fn new(agent: ureq::Agent, credentials: TumblrCredentials) -> Self {
        Self {
            agent,
            credentials,
            base_url: TUMBLR_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl FollowerFetcher for TumblrFetcher {
    fn network(&self) -> Network {
        Network::Tumblr
    }

    fn get_follower_count(&self, identifier: &str) -> FetchOutcome {
        let url = format!(
            "{}/v2/blog/{}/followers",
            self.base_url,
            oauth1::percent_encode(&blog_hostname(identifier))
        );
        let keys = OAuth1Keys {
            consumer_key: &self.credentials.consumer_key,
            consumer_secret: &self.credentials.consumer_secret,
            token: &self.credentials.oauth_token,
            token_secret: &self.credentials.oauth_token_secret,
        };
        let signed = match oauth1::sign_get(&url, &[], &keys) {
            Ok(signed) => signed,
            Err(e) => {
                return FetchOutcome::TransientError {
                    message: e.to_string(),
                }
            }
        };

        tracing::debug!("Fetching Tumblr followers for {}", identifier);
        match http::get_json(&self.agent, &signed.url, Some(&signed.authorization)) {
            Ok(reply) => parse_followers(&reply),
            Err(message) => FetchOutcome::TransientError { message },
        }
    }
}

/// `nz-angel` and `nz-angel.tumblr.com` name the same blog.
pub fn blog_hostname(identifier: &str) -> String {
    if identifier.contains('.') {
        identifier.to_string()
    } else {
        format!("{}.tumblr.com", identifier)
    }
}

/// Tumblr answers an expired token with a body that has no `total_users`,
/// so that absence is read as expired credentials.
fn parse_followers(reply: &JsonReply) -> FetchOutcome {
    if (500..=599).contains(&reply.status) {
        return FetchOutcome::TransientError {
            message: format!("Tumblr returned HTTP {}", reply.status),
        };
    }
    match reply.body["response"]["total_users"].as_u64() {
        Some(count) => http::status_outcome("Tumblr", reply.status)
            .unwrap_or(FetchOutcome::Success(count)),
        None => FetchOutcome::AuthExpired {
            message: "Tumblr OAuth tokens expired.".to_string(),
        },
    }
}

#[cfg(test)]
#[path = "tests/tumblr_tests.rs"]
mod tests;
