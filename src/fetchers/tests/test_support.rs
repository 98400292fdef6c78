//! Helpers shared by the fetcher tests that talk to a wiremock server.

use super::{FetchOutcome, FollowerFetcher};
use std::net::TcpListener;

/// Runs a blocking fetch off the async test runtime that drives the mock server.
pub async fn fetch<F>(fetcher: F, identifier: &'static str) -> FetchOutcome
where
    F: FollowerFetcher + Send + 'static,
{
    tokio::task::spawn_blocking(move || fetcher.get_follower_count(identifier))
        .await
        .unwrap()
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
