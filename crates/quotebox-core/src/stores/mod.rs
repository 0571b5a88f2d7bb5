// Persisted state slices. Each store owns exactly one storage key and
// writes through on every mutation.
pub mod favorites;
pub mod history;
pub mod stats;
pub mod theme;

pub use favorites::FavoritesStore;
pub use history::{HistoryStore, MAX_HISTORY};
pub use stats::StatsStore;
pub use theme::ThemeStore;

use quotebox_cache::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::Result;

pub const FAVORITES_KEY: &str = "quote-favorites";
pub const HISTORY_KEY: &str = "quote-history";
pub const STATS_KEY: &str = "quote-stats";
pub const THEME_KEY: &str = "quote-theme";

/// Read a JSON slot, falling back to the default on any trouble
///
/// A missing, unreadable, or corrupt slot is logged and treated as empty;
/// it never stops the app from starting.
pub(crate) fn load_slot<T: DeserializeOwned + Default>(backend: &dyn KeyValueStore, key: &str) -> T {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!("Failed to read '{}', starting empty: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Corrupt data in '{}', starting empty: {}", key, e);
            T::default()
        }
    }
}

pub(crate) fn save_slot<T: Serialize + ?Sized>(backend: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    backend.set(key, &json)?;
    Ok(())
}
