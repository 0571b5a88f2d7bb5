// Shared request plumbing for both quote APIs
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

/// Request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const USER_AGENT: &str = concat!("Quotebox/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "x-api-key";

/// Build a reqwest client with the fixed header set and timeout
///
/// The API key header is only attached when a key is configured; the
/// fallback API is public and gets no key at all.
pub(crate) fn build_client(timeout: Duration, api_key: Option<&str>) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        let mut value = HeaderValue::from_str(key)
            .map_err(|e| ApiError::Network(format!("Invalid API key header: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
    }

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))
}

/// GET a URL and decode the body as loose JSON
///
/// Non-2xx responses become `ApiError::Http` without touching the body.
pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<serde_json::Value> {
    debug!("GET {}", url);

    let mut request = client.get(url);
    if !query.is_empty() {
        request = request.query(query);
    }

    let response = request.send().await.map_err(|e| {
        warn!("API request failed: {}", e);
        ApiError::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!("API request to {} returned {}", url, status);
        return Err(ApiError::Http {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let value = serde_json::from_str(&body)?;
    Ok(value)
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
