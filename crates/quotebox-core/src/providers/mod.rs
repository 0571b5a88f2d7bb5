// Quote sources behind one trait, so the service never cares which client it talks to
pub mod http;

pub use http::HttpQuoteProvider;

use std::time::Duration;

use async_trait::async_trait;
use quotebox_api::{ApiError, NinjaQuote, QuotableQuote};
use tracing::debug;

/// Pause between calls in `fetch_multiple`, to stay under rate limits
pub const DEFAULT_RATE_LIMIT_DELAY_MS: u64 = 100;

/// Where quotes come from
///
/// Errors are the raw `ApiError` taxonomy; deciding what to do about them
/// is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// One random quote from the primary API
    async fn fetch_random(&self) -> Result<NinjaQuote, ApiError>;

    /// All primary-API quotes for a category; empty is not an error
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<NinjaQuote>, ApiError>;

    /// One random quote from the secondary API
    async fn fetch_fallback(&self) -> Result<QuotableQuote, ApiError>;
}

/// Fetch `limit` random quotes, one request at a time
///
/// Calls never overlap, with `delay` between them. The first failure
/// aborts the whole batch; partial results are dropped.
pub async fn fetch_multiple(
    provider: &dyn QuoteProvider,
    limit: usize,
    delay: Duration,
) -> Result<Vec<NinjaQuote>, ApiError> {
    let mut quotes = Vec::with_capacity(limit);

    for i in 0..limit {
        let quote = provider.fetch_random().await?;
        quotes.push(quote);

        if i + 1 < limit && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    debug!("Fetched {} quotes sequentially", quotes.len());
    Ok(quotes)
}
