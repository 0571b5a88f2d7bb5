// Live provider - bridges the API clients with the QuoteProvider trait
use std::time::Duration;

use async_trait::async_trait;
use quotebox_api::{ApiError, NinjaQuote, NinjasClient, QuotableClient, QuotableQuote};

use crate::{config::Config, providers::QuoteProvider, Result};

/// Talks to API Ninjas first and Quotable as the fallback
pub struct HttpQuoteProvider {
    primary: NinjasClient,
    fallback: QuotableClient,
}

impl HttpQuoteProvider {
    pub fn new(primary: NinjasClient, fallback: QuotableClient) -> Self {
        Self { primary, fallback }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_millis(config.api.timeout_ms);
        let primary =
            NinjasClient::with_base_url(config.api.base_url.clone(), config.api.api_key.clone(), timeout)?;
        let fallback = QuotableClient::with_base_url(config.api.fallback_url.clone(), timeout)?;
        Ok(Self::new(primary, fallback))
    }
}

#[async_trait]
impl QuoteProvider for HttpQuoteProvider {
    async fn fetch_random(&self) -> std::result::Result<NinjaQuote, ApiError> {
        self.primary.fetch_random().await
    }

    async fn fetch_by_category(&self, category: &str) -> std::result::Result<Vec<NinjaQuote>, ApiError> {
        self.primary.fetch_by_category(category).await
    }

    async fn fetch_fallback(&self) -> std::result::Result<QuotableQuote, ApiError> {
        self.fallback.fetch_random().await
    }
}
