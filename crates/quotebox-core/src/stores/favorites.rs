use std::sync::Arc;

use quotebox_cache::{Clock, KeyValueStore};
use tracing::debug;

use super::{load_slot, save_slot, FAVORITES_KEY};
use crate::{export::Exporter, models::FavoriteQuote, models::Quote, Result};

/// Starred quotes, oldest first, unique by id
pub struct FavoritesStore {
    backend: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    favorites: Vec<FavoriteQuote>,
}

impl FavoritesStore {
    pub fn open(backend: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let favorites: Vec<FavoriteQuote> = load_slot(backend.as_ref(), FAVORITES_KEY);
        debug!("Loaded {} favorites", favorites.len());
        Self {
            backend,
            clock,
            favorites,
        }
    }

    pub fn list(&self) -> &[FavoriteQuote] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f.quote.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteQuote> {
        self.favorites.iter().find(|f| f.quote.id == id)
    }

    /// Star a quote. Already starred? Nothing changes, `favoritedAt` included.
    pub fn add(&mut self, quote: &Quote) -> Result<&[FavoriteQuote]> {
        if self.is_favorite(&quote.id) {
            return Ok(&self.favorites);
        }

        let mut next = self.favorites.clone();
        next.push(FavoriteQuote {
            quote: quote.clone(),
            favorited_at: self.clock.now_millis(),
        });
        self.commit(next)
    }

    /// Unstar by id; unknown ids are a no-op
    pub fn remove(&mut self, id: &str) -> Result<&[FavoriteQuote]> {
        let next: Vec<FavoriteQuote> = self
            .favorites
            .iter()
            .filter(|f| f.quote.id != id)
            .cloned()
            .collect();
        self.commit(next)
    }

    /// Add if absent, remove if present. Returns whether it's now a favorite.
    pub fn toggle(&mut self, quote: &Quote) -> Result<bool> {
        if self.is_favorite(&quote.id) {
            self.remove(&quote.id)?;
            Ok(false)
        } else {
            self.add(quote)?;
            Ok(true)
        }
    }

    /// Standalone pretty-printed JSON document of every favorite
    pub fn export_json(&self) -> Result<String> {
        Exporter::to_json(&self.favorites)
    }

    fn commit(&mut self, next: Vec<FavoriteQuote>) -> Result<&[FavoriteQuote]> {
        save_slot(self.backend.as_ref(), FAVORITES_KEY, &next)?;
        self.favorites = next;
        Ok(&self.favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotebox_cache::{ManualClock, MemoryStore};

    fn quote(id: &str) -> Quote {
        Quote {
            id: id.to_string(),
            text: format!("Quote {}", id),
            author: "Author".to_string(),
            category: "life".to_string(),
            length: 7 + id.chars().count(),
        }
    }

    fn store() -> (FavoritesStore, Arc<MemoryStore>, Arc<ManualClock>) {
        let backend = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(1_000));
        let store = FavoritesStore::open(backend.clone(), clock.clone());
        (store, backend, clock)
    }

    #[test]
    fn test_add_twice_keeps_one() {
        let (mut store, _, clock) = store();
        store.add(&quote("a")).unwrap();
        clock.advance(500);
        let favorites = store.add(&quote("a")).unwrap();

        assert_eq!(favorites.len(), 1);
        // favoritedAt is never touched again
        assert_eq!(favorites[0].favorited_at, 1_000);
    }

    #[test]
    fn test_add_appends_in_order() {
        let (mut store, _, clock) = store();
        store.add(&quote("a")).unwrap();
        clock.advance(10);
        store.add(&quote("b")).unwrap();

        let ids: Vec<&str> = store.list().iter().map(|f| f.quote.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("b").unwrap().favorited_at, 1_010);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut store, _, _) = store();
        store.add(&quote("a")).unwrap();
        store.remove("zzz").unwrap();
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        assert!(store.is_empty());
        assert!(!store.is_favorite("a"));
    }

    #[test]
    fn test_toggle() {
        let (mut store, _, _) = store();
        assert!(store.toggle(&quote("a")).unwrap());
        assert!(store.is_favorite("a"));
        assert!(!store.toggle(&quote("a")).unwrap());
        assert!(!store.is_favorite("a"));
    }

    #[test]
    fn test_writes_through_to_backend() {
        let (mut store, backend, clock) = store();
        store.add(&quote("a")).unwrap();
        store.add(&quote("b")).unwrap();
        store.remove("a").unwrap();

        let reopened = FavoritesStore::open(backend, clock);
        assert_eq!(reopened.len(), 1);
        assert!(reopened.is_favorite("b"));
    }

    #[test]
    fn test_export_parses_back() {
        let (mut store, _, _) = store();
        store.add(&quote("a")).unwrap();
        store.add(&quote("b")).unwrap();

        let json = store.export_json().unwrap();
        let parsed: Vec<FavoriteQuote> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store.list().to_vec());
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(FAVORITES_KEY, "[{\"id\": 1").unwrap();
        let store = FavoritesStore::open(backend, Arc::new(ManualClock::new(0)));
        assert!(store.is_empty());
    }
}
