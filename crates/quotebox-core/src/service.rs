// Quote service: fetch with fallback, format, never fail loudly
use std::sync::Arc;
use std::time::Duration;

use quotebox_api::{NinjaQuote, RawQuote, DEFAULT_CATEGORY};
use quotebox_cache::{Clock, ResponseCache, SystemClock};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    categories::{AVAILABLE_CATEGORIES, POPULAR_CATEGORIES},
    config::Config,
    models::Quote,
    providers::{fetch_multiple, HttpQuoteProvider, QuoteProvider},
    sequence::{RequestSequencer, Ticket},
    Result,
};

pub const DEFAULT_MULTIPLE_LIMIT: usize = 5;

pub const FALLBACK_QUOTE_ID: &str = "fallback";

/// Outcome of picking a quote from a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPick {
    pub quote: Quote,
    /// `false` when the category had nothing and a random quote stood in
    pub from_category: bool,
}

/// Quote shown when every API is down
pub fn fallback_quote() -> Quote {
    let text = "The only way to do great work is to love what you do.";
    Quote {
        id: FALLBACK_QUOTE_ID.to_string(),
        text: text.to_string(),
        author: "Steve Jobs".to_string(),
        category: "inspirational".to_string(),
        // Fixed, not derived from `text`; this quote never goes through formatting
        length: 48,
    }
}

/// Turn a raw quote from either API into the canonical shape
///
/// The id is `{author}-{millis}-{random fraction}`, so it is unique per call
/// and deliberately not stable across fetches.
pub fn format_quote(raw: RawQuote, now_millis: i64) -> Quote {
    if raw.is_fallback() {
        debug!("Adapting fallback API quote");
    }
    let native = raw.into_native();
    let category = native
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let salt: f64 = rand::random();

    Quote {
        id: format!("{}-{}-{}", native.author, now_millis, salt),
        length: native.quote.chars().count(),
        text: native.quote,
        author: native.author,
        category,
    }
}

/// Orchestrates providers, caching, and the fallback chain
///
/// Every public fetch absorbs errors: the caller gets a quote, a list, or
/// an empty list, never an `Err`.
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    category_cache: ResponseCache<Vec<NinjaQuote>>,
    clock: Arc<dyn Clock>,
    sequencer: RequestSequencer,
    rate_limit_delay: Duration,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock), quotebox_cache::DEFAULT_TTL_MS)
    }

    pub fn with_clock(provider: Arc<dyn QuoteProvider>, clock: Arc<dyn Clock>, cache_ttl_ms: i64) -> Self {
        Self {
            provider,
            category_cache: ResponseCache::with_clock(cache_ttl_ms, clock.clone()),
            clock,
            sequencer: RequestSequencer::new(),
            rate_limit_delay: Duration::from_millis(crate::providers::DEFAULT_RATE_LIMIT_DELAY_MS),
        }
    }

    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Wire up the live HTTP provider from config
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = HttpQuoteProvider::from_config(config)?;
        Ok(
            Self::with_clock(Arc::new(provider), Arc::new(SystemClock), config.cache.ttl_ms)
                .with_rate_limit_delay(Duration::from_millis(config.api.rate_limit_delay_ms)),
        )
    }

    /// Primary API, then fallback API, then the hardcoded quote
    pub async fn random_quote(&self) -> Quote {
        match self.provider.fetch_random().await {
            Ok(quote) => return self.format(RawQuote::Native(quote)),
            Err(e) => warn!("Error fetching random quote: {}", e),
        }

        match self.provider.fetch_fallback().await {
            Ok(quote) => {
                info!("Using fallback quote API");
                self.format(RawQuote::Fallback(quote))
            }
            Err(e) => {
                warn!("Fallback API also failed: {}", e);
                fallback_quote()
            }
        }
    }

    /// Like `random_quote`, but `None` if a newer request started meanwhile
    pub async fn random_quote_tracked(&self) -> Option<Quote> {
        let ticket = self.sequencer.begin();
        let quote = self.random_quote().await;
        self.if_latest(ticket, quote)
    }

    /// One random quote out of a category, becoming the current quote
    ///
    /// An empty (or failed) category falls back to `random_quote`. Shares the
    /// sequencer with `random_quote_tracked`, so `None` means a newer request
    /// of either kind started meanwhile.
    pub async fn quote_from_category(&self, category: &str) -> Option<CategoryPick> {
        let ticket = self.sequencer.begin();
        let mut quotes = self.category_quotes(category).await;

        let pick = if quotes.is_empty() {
            info!("No quotes found for {}, showing random quote", category);
            CategoryPick {
                quote: self.random_quote().await,
                from_category: false,
            }
        } else {
            let index = rand::thread_rng().gen_range(0..quotes.len());
            CategoryPick {
                quote: quotes.swap_remove(index),
                from_category: true,
            }
        };

        self.if_latest(ticket, pick)
    }

    /// Quotes for one category; empty on any failure
    ///
    /// Raw responses are cached per category, but ids are minted fresh on
    /// every call.
    pub async fn category_quotes(&self, category: &str) -> Vec<Quote> {
        let key = format!("category:{}", category);
        let provider = self.provider.clone();

        let result = self
            .category_cache
            .get_or_insert_with(&key, || async move { provider.fetch_by_category(category).await })
            .await;

        match result {
            Ok(quotes) => quotes
                .into_iter()
                .map(|q| self.format(RawQuote::Native(q)))
                .collect(),
            Err(e) => {
                warn!("Error fetching quotes for category {}: {}", category, e);
                Vec::new()
            }
        }
    }

    /// `limit` random quotes in one go; empty if any of them fails
    pub async fn multiple_random_quotes(&self, limit: usize) -> Vec<Quote> {
        match fetch_multiple(self.provider.as_ref(), limit, self.rate_limit_delay).await {
            Ok(quotes) => quotes
                .into_iter()
                .map(|q| self.format(RawQuote::Native(q)))
                .collect(),
            Err(e) => {
                warn!("Error fetching multiple quotes: {}", e);
                Vec::new()
            }
        }
    }

    pub fn format_quote(&self, raw: RawQuote) -> Quote {
        self.format(raw)
    }

    pub fn available_categories(&self) -> &'static [&'static str] {
        &AVAILABLE_CATEGORIES
    }

    pub fn popular_categories(&self) -> &'static [&'static str] {
        &POPULAR_CATEGORIES
    }

    pub fn clear_cache(&self) {
        self.category_cache.clear();
    }

    fn if_latest<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.sequencer.is_latest(ticket) {
            Some(value)
        } else {
            debug!("Dropping stale quote response {:?}", ticket);
            None
        }
    }

    fn format(&self, raw: RawQuote) -> Quote {
        format_quote(raw, self.clock.now_millis())
    }
}
