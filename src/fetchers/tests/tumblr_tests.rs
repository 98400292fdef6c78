use super::*;
use crate::fetchers::test_support::{fetch, unreachable_base_url};
use std::time::Duration;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(base_url: &str) -> TumblrFetcher {
    let credentials = TumblrCredentials {
        consumer_key: "tumblr-ck".to_string(),
        consumer_secret: "tumblr-cs".to_string(),
        oauth_token: "tumblr-token".to_string(),
        oauth_token_secret: "tumblr-secret".to_string(),
    };
    TumblrFetcher::new(http::build_agent(Duration::from_secs(5)), credentials)
        .with_base_url(base_url)
}

fn reply(status: u16, body: serde_json::Value) -> JsonReply {
    JsonReply { status, body }
}

#[tokio::test]
async fn test_reads_total_users_with_signed_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/blog/nz-angel.tumblr.com/followers"))
        .and(header_regex(
            "authorization",
            r#"^OAuth oauth_consumer_key="tumblr-ck", .*oauth_token="tumblr-token""#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meta": {"status": 200, "msg": "OK"},
            "response": {"total_users": 50, "users": []}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = fetch(fetcher(&mock_server.uri()), "nz-angel").await;

    assert_eq!(outcome, FetchOutcome::Success(50));
}

#[tokio::test]
async fn test_missing_total_users_is_auth_expired_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/blog/nz-angel.tumblr.com/followers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "meta": {"status": 401, "msg": "Unauthorized"},
            "response": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = fetch(fetcher(&mock_server.uri()), "nz-angel").await;

    assert_eq!(
        outcome,
        FetchOutcome::AuthExpired {
            message: "Tumblr OAuth tokens expired.".to_string()
        }
    );
}

#[test]
fn test_missing_total_users_on_success_status_is_auth_expired() {
    let outcome = parse_followers(&reply(200, serde_json::json!({"response": {}})));
    assert!(matches!(outcome, FetchOutcome::AuthExpired { .. }));
}

#[test]
fn test_server_error_is_transient() {
    let outcome = parse_followers(&reply(503, serde_json::Value::Null));
    assert!(matches!(outcome, FetchOutcome::TransientError { .. }));
}

#[test]
fn test_count_with_error_status_is_not_success() {
    let outcome = parse_followers(&reply(
        429,
        serde_json::json!({"response": {"total_users": 50}}),
    ));
    assert!(matches!(outcome, FetchOutcome::TransientError { .. }));
}

#[test]
fn test_blog_hostname() {
    assert_eq!(blog_hostname("nz-angel"), "nz-angel.tumblr.com");
    assert_eq!(blog_hostname("blog.example.com"), "blog.example.com");
}

#[test]
fn test_connection_refused_is_transient() {
    let outcome = fetcher(&unreachable_base_url()).get_follower_count("nz-angel");
    assert!(matches!(outcome, FetchOutcome::TransientError { .. }));
}
