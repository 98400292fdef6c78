//! OAuth 1.0a request signing (HMAC-SHA1), as used by the Twitter v1.1 and
//! Tumblr v2 APIs.

use anyhow::{anyhow, Result};
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Everything except the RFC 3986 unreserved set gets encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;

/// Consumer and token credentials for one signed request.
#[derive(Debug, Clone, Copy)]
pub struct OAuth1Keys<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: &'a str,
    pub token_secret: &'a str,
}

/// A GET request ready to send: full URL with query and its Authorization header.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub url: String,
    pub authorization: String,
}

pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Appends `query` to `base_url` using the same encoding the signature uses.
pub fn url_with_query(base_url: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return base_url.to_string();
    }
    let encoded: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect();
    format!("{}?{}", base_url, encoded.join("&"))
}

/// Signs a GET with a fresh nonce and the current time.
pub fn sign_get(
    base_url: &str,
    query: &[(&str, &str)],
    keys: &OAuth1Keys<'_>,
) -> Result<SignedRequest> {
    let nonce = generate_nonce();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    Ok(SignedRequest {
        url: url_with_query(base_url, query),
        authorization: authorization_header("GET", base_url, query, keys, &nonce, &timestamp)?,
    })
}

/// Builds the `Authorization: OAuth ...` header value.
pub fn authorization_header(
    method: &str,
    base_url: &str,
    query: &[(&str, &str)],
    keys: &OAuth1Keys<'_>,
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let mut oauth_params = oauth_params(keys, nonce, timestamp);
    let sig = signature(method, base_url, query, &oauth_params, keys)?;
    oauth_params.push(("oauth_signature", sig));
    oauth_params.sort();

    let parts: Vec<String> = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect();
    Ok(format!("OAuth {}", parts.join(", ")))
}

fn oauth_params(
    keys: &OAuth1Keys<'_>,
    nonce: &str,
    timestamp: &str,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("oauth_consumer_key", keys.consumer_key.to_string()),
        ("oauth_nonce", nonce.to_string()),
        ("oauth_signature_method", "HMAC-SHA1".to_string()),
        ("oauth_timestamp", timestamp.to_string()),
        ("oauth_version", "1.0".to_string()),
    ];
    if !keys.token.is_empty() {
        params.push(("oauth_token", keys.token.to_string()));
    }
    params
}

/// Base64 HMAC-SHA1 over the RFC 5849 signature base string.
pub fn signature(
    method: &str,
    base_url: &str,
    query: &[(&str, &str)],
    oauth_params: &[(&'static str, String)],
    keys: &OAuth1Keys<'_>,
) -> Result<String> {
    let mut encoded: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .chain(
            oauth_params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&param_string)
    );
    let signing_key = format!(
        "{}&{}",
        percent_encode(keys.consumer_secret),
        percent_encode(keys.token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .map_err(|e| anyhow!("Failed to initialise HMAC-SHA1 signer: {}", e))?;
    mac.update(base_string.as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
#[path = "tests/oauth1_tests.rs"]
mod tests;
