use std::time::Duration;

use tracing::debug;

use crate::error::{ApiError, Result};
use crate::http::{build_client, get_json, join_url, DEFAULT_TIMEOUT_MS};
use crate::models::NinjaQuote;

pub const NINJAS_API_BASE: &str = "https://api.api-ninjas.com/v1";

/// Client for the primary quote API
///
/// API Ninjas returns an array from `/quotes` even for a "random" quote, so
/// a random fetch takes the first element.
pub struct NinjasClient {
    client: reqwest::Client,
    base_url: String,
}

impl NinjasClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(
            NINJAS_API_BASE.to_string(),
            api_key,
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
        )
    }

    /// Point the client somewhere else (self-hosted proxy, test server)
    pub fn with_base_url(base_url: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = build_client(timeout, api_key.as_deref())?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one random quote
    pub async fn fetch_random(&self) -> Result<NinjaQuote> {
        let url = join_url(&self.base_url, "quotes");
        let body = get_json(&self.client, &url, &[]).await?;
        first_quote(body)
    }

    /// Fetch every quote the API has for a category
    ///
    /// An empty list is a valid answer, not an error.
    pub async fn fetch_by_category(&self, category: &str) -> Result<Vec<NinjaQuote>> {
        let url = join_url(&self.base_url, "quotes");
        let body = get_json(&self.client, &url, &[("category", category)]).await?;
        let quotes = quote_list(body)?;
        debug!("Category '{}' returned {} quotes", category, quotes.len());
        Ok(quotes)
    }
}

fn first_quote(body: serde_json::Value) -> Result<NinjaQuote> {
    match body {
        serde_json::Value::Array(items) => {
            let first = items.into_iter().next().ok_or(ApiError::EmptyResult)?;
            Ok(serde_json::from_value(first)?)
        }
        _ => Err(ApiError::EmptyResult),
    }
}

fn quote_list(body: serde_json::Value) -> Result<Vec<NinjaQuote>> {
    match body {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(body)?),
        // Anything that isn't an array means "nothing for this category"
        _ => Ok(Vec::new()),
    }
}
