use super::*;
use crate::fetchers::test_support::fetch;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(base_url: &str, page_id: &str) -> InstagramFetcher {
    let credentials = InstagramCredentials {
        access_token: "EAAB token".to_string(),
        page_id: page_id.to_string(),
    };
    InstagramFetcher::new(http::build_agent(Duration::from_secs(5)), credentials)
        .with_base_url(base_url)
}

#[tokio::test]
async fn test_token_and_page_id_go_in_query_string() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("id", "1784"))
        .and(query_param("fields", "followers_count"))
        .and(query_param("access_token", "EAAB token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"followers_count": 200, "id": "1784"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = fetch(fetcher(&mock_server.uri(), "1784"), "nz.angel").await;

    assert_eq!(outcome, FetchOutcome::Success(200));
    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_identifier_used_when_page_id_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("id", "99887766"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"followers_count": 7})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = fetch(fetcher(&mock_server.uri(), ""), "99887766").await;

    assert_eq!(outcome, FetchOutcome::Success(7));
}

#[tokio::test]
async fn test_handle_without_page_id_sends_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = fetch(fetcher(&mock_server.uri(), ""), "nz.angel").await;

    match outcome {
        FetchOutcome::TransientError { message } => {
            assert!(message.contains("'nz.angel' is not numeric"));
            assert!(message.contains("journey credentials set instagram"));
        }
        other => panic!("expected TransientError, got {:?}", other),
    }
}

#[test]
fn test_expired_token_error_code_is_auth_expired() {
    let reply = JsonReply {
        status: 400,
        body: serde_json::json!({
            "error": {"message": "Error validating access token", "type": "OAuthException", "code": 190}
        }),
    };

    match parse_graph_reply(&reply) {
        FetchOutcome::AuthExpired { message } => {
            assert!(message.contains("Error validating access token"))
        }
        other => panic!("expected AuthExpired, got {:?}", other),
    }
}

#[test]
fn test_other_graph_error_is_transient() {
    let reply = JsonReply {
        status: 400,
        body: serde_json::json!({"error": {"message": "Unsupported get request", "code": 100}}),
    };
    assert!(matches!(
        parse_graph_reply(&reply),
        FetchOutcome::TransientError { .. }
    ));
}

#[test]
fn test_missing_count_is_transient() {
    let reply = JsonReply {
        status: 200,
        body: serde_json::json!({"id": "1784"}),
    };
    assert!(matches!(
        parse_graph_reply(&reply),
        FetchOutcome::TransientError { .. }
    ));
}
