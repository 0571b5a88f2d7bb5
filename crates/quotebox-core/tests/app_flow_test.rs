use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quotebox_api::{ApiError, NinjaQuote, QuotableQuote};
use quotebox_core::{
    export::Exporter, service::fallback_quote, FavoriteQuote, FavoritesStore, HistoryStore,
    KeyValueStore, ManualClock, QuoteProvider, QuoteService, SqliteStore, StatsStore, ThemeStore,
    Theme,
};
use tempfile::TempDir;

/// Scripted provider: primary and fallback either work or don't
struct ScriptedProvider {
    primary_up: bool,
    fallback_tags: Option<Vec<String>>,
    random_calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(primary_up: bool, fallback_tags: Option<Vec<String>>) -> Self {
        Self {
            primary_up,
            fallback_tags,
            random_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    async fn fetch_random(&self) -> Result<NinjaQuote, ApiError> {
        let n = self.random_calls.fetch_add(1, Ordering::SeqCst);
        if !self.primary_up {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(NinjaQuote {
            quote: format!("Primary quote number {}.", n),
            author: if n % 2 == 0 { "Ada" } else { "Grace" }.to_string(),
            category: Some(if n % 3 == 2 { "life" } else { "love" }.to_string()),
        })
    }

    async fn fetch_by_category(&self, category: &str) -> Result<Vec<NinjaQuote>, ApiError> {
        if !self.primary_up {
            return Err(ApiError::Http { status: 503 });
        }
        Ok(vec![NinjaQuote {
            quote: format!("All about {}.", category),
            author: "Topic Bot".to_string(),
            category: Some(category.to_string()),
        }])
    }

    async fn fetch_fallback(&self) -> Result<QuotableQuote, ApiError> {
        match &self.fallback_tags {
            Some(tags) => Ok(QuotableQuote {
                content: "Fallback wisdom.".to_string(),
                author: "Quotable".to_string(),
                tags: tags.clone(),
            }),
            None => Err(ApiError::Network("also down".to_string())),
        }
    }
}

fn service(provider: ScriptedProvider, clock: Arc<ManualClock>) -> QuoteService {
    QuoteService::with_clock(Arc::new(provider), clock, 300_000).with_rate_limit_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_primary_down_fallback_tag_becomes_category() {
    let clock = Arc::new(ManualClock::new(0));
    let svc = service(
        ScriptedProvider::new(false, Some(vec!["famous-quotes".to_string()])),
        clock,
    );

    let quote = svc.random_quote().await;
    assert_eq!(quote.author, "Quotable");
    assert_eq!(quote.category, "famous-quotes");
    assert_eq!(quote.length, "Fallback wisdom.".len());
}

#[tokio::test]
async fn test_primary_down_fallback_untagged_is_general() {
    let clock = Arc::new(ManualClock::new(0));
    let svc = service(ScriptedProvider::new(false, Some(vec![])), clock);
    assert_eq!(svc.random_quote().await.category, "general");
}

#[tokio::test]
async fn test_everything_down_gives_constant() {
    let clock = Arc::new(ManualClock::new(0));
    let svc = service(ScriptedProvider::new(false, None), clock);

    let quote = svc.random_quote().await;
    assert_eq!(quote, fallback_quote());
    assert_eq!(quote.author, "Steve Jobs");
    assert_eq!(quote.length, 48);

    // The list operations degrade to empty rather than erroring
    assert!(svc.category_quotes("love").await.is_empty());
    assert!(svc.multiple_random_quotes(3).await.is_empty());
}

#[tokio::test]
async fn test_session_persists_across_restart() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("quotebox.db");
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));

    let exported = {
        let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path).unwrap());
        let svc = service(ScriptedProvider::new(true, None), clock.clone());

        let mut history = HistoryStore::open(backend.clone(), clock.clone());
        let mut stats = StatsStore::open(backend.clone()).unwrap();
        let mut favorites = FavoritesStore::open(backend.clone(), clock.clone());
        let mut theme = ThemeStore::open(backend.clone());

        for quote in svc.multiple_random_quotes(3).await {
            clock.advance(1_000);
            history.add(&quote).unwrap();
            stats.update(&quote).unwrap();
        }

        let latest = history.latest().unwrap().quote.clone();
        favorites.add(&latest).unwrap();
        favorites.add(&latest).unwrap();
        theme.toggle().unwrap();

        assert_eq!(stats.stats().total_quotes_viewed, 3);
        assert_eq!(stats.stats().favorite_categories.get("love"), Some(&2));
        assert_eq!(stats.stats().favorite_categories.get("life"), Some(&1));
        assert_eq!(stats.stats().favorite_authors.get("Ada"), Some(&2));

        favorites.export_json().unwrap()
    };

    // "Restart": fresh handles over the same file
    let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path).unwrap());
    let history = HistoryStore::open(backend.clone(), clock.clone());
    let stats = StatsStore::open(backend.clone()).unwrap();
    let favorites = FavoritesStore::open(backend.clone(), clock.clone());
    let theme = ThemeStore::open(backend);

    assert_eq!(history.len(), 3);
    assert_eq!(history.latest().unwrap().quote.text, "Primary quote number 2.");
    assert_eq!(stats.stats().sessions_count, 2);
    assert_eq!(stats.stats().total_quotes_viewed, 3);
    assert_eq!(favorites.len(), 1);
    assert_eq!(theme.theme(), Theme::Dark);

    let parsed: Vec<FavoriteQuote> = serde_json::from_str(&exported).unwrap();
    assert_eq!(parsed, favorites.list().to_vec());
    assert_eq!(Exporter::to_json(favorites.list()).unwrap(), exported);
}
