//! Instagram follower counts through the Facebook Graph API.

use super::http::{self, JsonReply};
use super::oauth1::url_with_query;
use super::{FetchOutcome, FollowerFetcher};
use crate::credentials::InstagramCredentials;
use crate::network::Network;

pub const GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";

/// Graph API error code for an expired or invalid access token.
const GRAPH_INVALID_TOKEN: i64 = 190;

pub struct InstagramFetcher {
    agent: ureq::Agent,
    credentials: InstagramCredentials,
    base_url: String,
}

impl InstagramFetcher {
    pub fn new(agent: ureq::Agent, credentials: InstagramCredentials) -> Self {
        Self {
            agent,
            credentials,
            base_url: GRAPH_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured page id, or `identifier` when none is stored.
    /// Graph API ids are numeric; a handle never resolves.
    fn page_id<'a>(&'a self, identifier: &'a str) -> &'a str {
        if self.credentials.page_id.is_empty() {
            identifier
        } else {
            &self.credentials.page_id
        }
    }
}

impl FollowerFetcher for InstagramFetcher {
    fn network(&self) -> Network {
        Network::Instagram
    }

    fn get_follower_count(&self, identifier: &str) -> FetchOutcome {
        let page_id = self.page_id(identifier);
        if page_id.is_empty() || !page_id.chars().all(|c| c.is_ascii_digit()) {
            return FetchOutcome::TransientError {
                message: format!(
                    "Instagram page id '{}' is not numeric. Run `journey credentials set instagram` to store the Graph API page id.",
                    page_id
                ),
            };
        }

        let url = url_with_query(
            &format!("{}/", self.base_url),
            &[
                ("id", page_id),
                ("fields", "followers_count"),
                ("access_token", &self.credentials.access_token),
            ],
        );

        tracing::debug!("Fetching Instagram followers for {}", identifier);
        match http::get_json(&self.agent, &url, None) {
            Ok(reply) => parse_graph_reply(&reply),
            Err(message) => FetchOutcome::TransientError { message },
        }
    }
}

fn parse_graph_reply(reply: &JsonReply) -> FetchOutcome {
    let error = &reply.body["error"];
    if error["code"].as_i64() == Some(GRAPH_INVALID_TOKEN) {
        return FetchOutcome::AuthExpired {
            message: format!(
                "Instagram access token rejected: {}",
                error["message"].as_str().unwrap_or("invalid OAuth access token")
            ),
        };
    }
    if let Some(outcome) = http::status_outcome("Instagram", reply.status) {
        return outcome;
    }
    match reply.body["followers_count"].as_u64() {
        Some(count) => FetchOutcome::Success(count),
        None => FetchOutcome::TransientError {
            message: "Missing followers_count in Instagram response".to_string(),
        },
    }
}

#[cfg(test)]
#[path = "tests/instagram_tests.rs"]
mod tests;
