use thiserror::Error;

/// All the ways Quotebox can fail
///
/// Most of these never reach a user: the service turns API failures into
/// fallbacks and the stores turn corrupt data into defaults. What's left is
/// config trouble and the disk refusing a write.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(#[from] quotebox_api::ApiError),

    #[error("Storage error: {0}")]
    StorageError(#[from] quotebox_cache::CacheError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
