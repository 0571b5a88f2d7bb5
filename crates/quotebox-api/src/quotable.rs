use std::time::Duration;

use crate::error::Result;
use crate::http::{build_client, get_json, join_url, DEFAULT_TIMEOUT_MS};
use crate::models::QuotableQuote;

pub const QUOTABLE_API_BASE: &str = "https://api.quotable.io";

/// Client for the fallback quote API. Public, no key needed.
pub struct QuotableClient {
    client: reqwest::Client,
    base_url: String,
}

impl QuotableClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(
            QUOTABLE_API_BASE.to_string(),
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
        )
    }

    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self> {
        let client = build_client(timeout, None)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_random(&self) -> Result<QuotableQuote> {
        let url = join_url(&self.base_url, "random");
        let body = get_json(&self.client, &url, &[]).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::test_server::serve_once;

    fn client(base_url: String) -> QuotableClient {
        QuotableClient::with_base_url(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_random_parses_and_sends_no_key() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"_id": "x1", "content": "Be kind.", "author": "Anon", "tags": ["wisdom", "life"]}"#,
        )
        .await;

        let quote = client(base).fetch_random().await.unwrap();
        assert_eq!(quote.content, "Be kind.");
        assert_eq!(quote.tags, vec!["wisdom".to_string(), "life".to_string()]);

        let request = request.await.unwrap();
        assert!(request.starts_with("get /random "));
        assert!(!request.contains("x-api-key"));
    }

    #[tokio::test]
    async fn test_fetch_random_non_2xx_is_http_error() {
        let (base, _request) = serve_once("500 Internal Server Error", "{}").await;
        assert_eq!(client(base).fetch_random().await, Err(ApiError::Http { status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_random_wrong_shape_is_parse_error() {
        let (base, _request) = serve_once("200 OK", r#"[{"quote": "wrong api"}]"#).await;
        assert!(matches!(client(base).fetch_random().await, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) is closed on any sane machine
        let client =
            QuotableClient::with_base_url("http://127.0.0.1:9".to_string(), Duration::from_millis(500))
                .unwrap();
        let result = client.fetch_random().await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
