//! Blocking HTTP plumbing shared by the fetchers.

use super::FetchOutcome;
use std::time::Duration;

/// Status and parsed body of one GET.
///
/// `body` is `Value::Null` when the response was not JSON.
#[derive(Debug, Clone)]
pub struct JsonReply {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Builds an agent that hands non-2xx responses back instead of failing, so
/// the fetchers can tell expired credentials from other errors.
pub fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .user_agent(concat!("follower-journey/", env!("CARGO_PKG_VERSION")))
        .build()
        .into()
}

/// Issues a single GET. Transport failures come back as the error message.
pub fn get_json(
    agent: &ureq::Agent,
    url: &str,
    authorization: Option<&str>,
) -> Result<JsonReply, String> {
    let mut request = agent.get(url).header("Accept", "application/json");
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }

    let mut response = request
        .call()
        .map_err(|e| format!("Request failed: {}", e))?;
    let status = response.status().as_u16();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| format!("Failed to read response body: {}", e))?;
    let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);

    Ok(JsonReply { status, body })
}

/// Maps statuses that settle the outcome on their own.
///
/// 401/403 mean the credentials were refused; any other non-2xx status is a
/// transient failure. `None` for 2xx.
pub fn status_outcome(service: &str, status: u16) -> Option<FetchOutcome> {
    match status {
        200..=299 => None,
        401 | 403 => Some(FetchOutcome::AuthExpired {
            message: format!("{} rejected the credentials (HTTP {})", service, status),
        }),
        _ => Some(FetchOutcome::TransientError {
            message: format!("{} returned HTTP {}", service, status),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_outcome_classification() {
        assert!(status_outcome("Twitter", 200).is_none());
        assert!(matches!(
            status_outcome("Twitter", 401),
            Some(FetchOutcome::AuthExpired { .. })
        ));
        assert!(matches!(
            status_outcome("Twitter", 403),
            Some(FetchOutcome::AuthExpired { .. })
        ));
        assert!(matches!(
            status_outcome("Twitter", 429),
            Some(FetchOutcome::TransientError { .. })
        ));
        assert!(matches!(
            status_outcome("Twitter", 503),
            Some(FetchOutcome::TransientError { .. })
        ));
    }
}
