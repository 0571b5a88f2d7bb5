use std::sync::Arc;

use quotebox_cache::KeyValueStore;
use tracing::debug;

use super::{load_slot, save_slot, STATS_KEY};
use crate::{models::Quote, models::Stats, Result};

/// Usage counters
///
/// Opening the store *is* a session start: `sessionsCount` goes up by one
/// on every `open`, whether or not any quote gets viewed.
pub struct StatsStore {
    backend: Arc<dyn KeyValueStore>,
    stats: Stats,
}

impl StatsStore {
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let mut stats: Stats = load_slot(backend.as_ref(), STATS_KEY);
        stats.sessions_count += 1;
        save_slot(backend.as_ref(), STATS_KEY, &stats)?;
        debug!("Session #{} started", stats.sessions_count);

        Ok(Self { backend, stats })
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Count one view of `quote`
    pub fn update(&mut self, quote: &Quote) -> Result<&Stats> {
        let mut next = self.stats.clone();
        next.total_quotes_viewed += 1;
        *next
            .favorite_categories
            .entry(quote.category.clone())
            .or_insert(0) += 1;
        *next
            .favorite_authors
            .entry(quote.author.clone())
            .or_insert(0) += 1;

        save_slot(self.backend.as_ref(), STATS_KEY, &next)?;
        self.stats = next;
        Ok(&self.stats)
    }
}
