// Core quote logic: fetching with fallback, formatting, and the persisted stores
pub mod categories;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod providers;
pub mod sequence;
pub mod service;
pub mod share;
pub mod stores;

pub use config::Config;
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use models::{FavoriteQuote, HistoryEntry, Quote, Stats, Theme};
pub use providers::{HttpQuoteProvider, QuoteProvider};
pub use sequence::RequestSequencer;
pub use service::{CategoryPick, QuoteService};
pub use stores::{FavoritesStore, HistoryStore, StatsStore, ThemeStore};

// Re-exported so callers don't need the lower crates just to wire things up
pub use quotebox_api::ApiError;
pub use quotebox_cache::{Clock, KeyValueStore, ManualClock, MemoryStore, SqliteStore, SystemClock};

pub type Result<T> = std::result::Result<T, Error>;
