use std::sync::Arc;

use quotebox_cache::{Clock, KeyValueStore};

use super::{load_slot, save_slot, HISTORY_KEY};
use crate::{models::HistoryEntry, models::Quote, Result};

/// How many viewed quotes we remember
pub const MAX_HISTORY: usize = 50;

/// Recently viewed quotes, newest first, unique by id
pub struct HistoryStore {
    backend: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn open(backend: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mut entries: Vec<HistoryEntry> = load_slot(backend.as_ref(), HISTORY_KEY);
        // Someone else may have written a longer list; keep the invariant anyway
        entries.truncate(MAX_HISTORY);
        Self {
            backend,
            clock,
            entries,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a view. A quote seen before moves to the front with a fresh
    /// `viewedAt`; the oldest entries fall off past the cap.
    pub fn add(&mut self, quote: &Quote) -> Result<&[HistoryEntry]> {
        let mut next = Vec::with_capacity(MAX_HISTORY);
        next.push(HistoryEntry {
            quote: quote.clone(),
            viewed_at: self.clock.now_millis(),
        });
        next.extend(
            self.entries
                .iter()
                .filter(|e| e.quote.id != quote.id)
                .cloned(),
        );
        next.truncate(MAX_HISTORY);

        save_slot(self.backend.as_ref(), HISTORY_KEY, &next)?;
        self.entries = next;
        Ok(&self.entries)
    }

    /// Forget everything; the storage slot is removed, not just emptied
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(HISTORY_KEY)?;
        self.entries.clear();
        Ok(())
    }
}
