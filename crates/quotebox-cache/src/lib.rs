// Local state: a short-lived response cache plus the SQLite-backed slots
// that hold favorites, history, stats and theme between runs

pub mod cache;
pub mod clock;
pub mod storage;

pub use cache::{ResponseCache, DEFAULT_TTL_MS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{CacheError, KeyValueStore, MemoryStore, SqliteStore};
