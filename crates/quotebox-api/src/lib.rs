// HTTP clients for the quote APIs
pub mod error;
pub mod http;
pub mod models;
pub mod ninjas;
pub mod quotable;

#[cfg(test)]
pub(crate) mod test_server;

// Re-export common types
pub use error::{ApiError, Result};
pub use http::{DEFAULT_TIMEOUT_MS, USER_AGENT};
pub use models::{NinjaQuote, QuotableQuote, RawQuote, DEFAULT_CATEGORY};
pub use ninjas::{NinjasClient, NINJAS_API_BASE};
pub use quotable::{QuotableClient, QUOTABLE_API_BASE};
