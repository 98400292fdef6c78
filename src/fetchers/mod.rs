//! Follower count fetchers, one per network.
//!
//! Each fetcher makes exactly one GET per call and reports the result as a
//! [`FetchOutcome`] instead of failing, so callers can tell expired
//! credentials apart from ordinary network trouble. Nothing is retried.

pub mod http;
pub mod instagram;
pub mod oauth1;
pub mod tumblr;
pub mod twitter;

use crate::credentials::CredentialStore;
use crate::journey::RecordError;
use crate::network::Network;
use std::time::Duration;

pub use instagram::InstagramFetcher;
pub use tumblr::TumblrFetcher;
pub use twitter::TwitterFetcher;

/// Result of one follower count request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(u64),
    /// The network refused the stored credentials.
    AuthExpired { message: String },
    /// Anything else: transport errors, unexpected statuses, malformed bodies.
    TransientError { message: String },
}

impl FetchOutcome {
    /// Turns anything but a count into the matching recording error.
    pub fn into_result(self, network: Network) -> Result<u64, RecordError> {
        match self {
            FetchOutcome::Success(count) => Ok(count),
            FetchOutcome::AuthExpired { message } => {
                Err(RecordError::CredentialsExpired { network, message })
            }
            FetchOutcome::TransientError { message } => {
                Err(RecordError::FetchFailed { network, message })
            }
        }
    }
}

/// Looks up the current follower count of one account.
pub trait FollowerFetcher {
    fn network(&self) -> Network;

    fn get_follower_count(&self, identifier: &str) -> FetchOutcome;
}

/// One fetcher for every network.
pub struct FetcherSet {
    pub twitter: Box<dyn FollowerFetcher>,
    pub tumblr: Box<dyn FollowerFetcher>,
    pub instagram: Box<dyn FollowerFetcher>,
}

impl FetcherSet {
    pub fn get(&self, network: Network) -> &dyn FollowerFetcher {
        match network {
            Network::Twitter => self.twitter.as_ref(),
            Network::Tumblr => self.tumblr.as_ref(),
            Network::Instagram => self.instagram.as_ref(),
        }
    }
}

/// Builds the fetchers for a recording cycle from freshly loaded credentials.
pub trait FetcherProvider {
    fn fetchers(&self, credentials: &CredentialStore) -> FetcherSet;
}

/// Provider for the real network APIs.
pub struct HttpFetcherProvider {
    agent: ureq::Agent,
}

impl HttpFetcherProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: http::build_agent(timeout),
        }
    }
}

impl FetcherProvider for HttpFetcherProvider {
    fn fetchers(&self, credentials: &CredentialStore) -> FetcherSet {
        FetcherSet {
            twitter: Box::new(TwitterFetcher::new(
                self.agent.clone(),
                credentials.twitter().clone(),
            )),
            tumblr: Box::new(TumblrFetcher::new(
                self.agent.clone(),
                credentials.tumblr().clone(),
            )),
            instagram: Box::new(InstagramFetcher::new(
                self.agent.clone(),
                credentials.instagram().clone(),
            )),
        }
    }
}

#[cfg(test)]
#[path = "tests/test_support.rs"]
mod test_support;
