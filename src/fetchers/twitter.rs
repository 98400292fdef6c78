//! Twitter v1.1 follower counts (OAuth1 user context).

use super::http::{self, JsonReply};
use super::oauth1::{self, OAuth1Keys};
use super::{FetchOutcome, FollowerFetcher};
use crate::credentials::TwitterCredentials;
use crate::network::Network;

pub const TWITTER_API_BASE: &str = "https://api.twitter.com";

pub struct TwitterFetcher {
    agent: ureq::Agent,
    credentials: TwitterCredentials,
    base_url: String,
}

impl TwitterFetcher {
    pub fn new(agent: ureq::Agent, credentials: TwitterCredentials) -> Self {
        Self {
            agent,
            credentials,
            base_url: TWITTER_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn keys(&self) -> OAuth1Keys<'_> {
        OAuth1Keys {
            consumer_key: &self.credentials.consumer_key,
            consumer_secret: &self.credentials.consumer_secret,
            token: &self.credentials.access_token,
            token_secret: &self.credentials.access_token_secret,
        }
    }
}

impl FollowerFetcher for TwitterFetcher {
    fn network(&self) -> Network {
        Network::Twitter
    }

    fn get_follower_count(&self, identifier: &str) -> FetchOutcome {
        let url = format!("{}/1.1/users/show.json", self.base_url);
        let signed = match oauth1::sign_get(&url, &[("screen_name", identifier)], &self.keys()) {
            Ok(signed) => signed,
            Err(e) => {
                return FetchOutcome::TransientError {
                    message: e.to_string(),
                }
            }
        };

        tracing::debug!("Fetching Twitter followers for {}", identifier);
        match http::get_json(&self.agent, &signed.url, Some(&signed.authorization)) {
            Ok(reply) => parse_users_show(&reply),
            Err(message) => FetchOutcome::TransientError { message },
        }
    }
}

fn parse_users_show(reply: &JsonReply) -> FetchOutcome {
    if let Some(outcome) = http::status_outcome("Twitter", reply.status) {
        return outcome;
    }
    match reply.body["followers_count"].as_u64() {
        Some(count) => FetchOutcome::Success(count),
        None => FetchOutcome::TransientError {
            message: "Missing followers_count in Twitter response".to_string(),
        },
    }
}

#[cfg(test)]
#[path = "tests/twitter_tests.rs"]
mod tests;
