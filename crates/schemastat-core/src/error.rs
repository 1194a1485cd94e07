//! Error types for schemastat

use thiserror::Error;

/// Core error type for listing operations
#[derive(Error, Debug)]
pub enum StatError {
    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Row count error: {0}")]
    RowCount(String),

    #[error("Storage length lookup error: {0}")]
    StorageLengths(String),

    #[error("Favorites error: {0}")]
    Favorites(String),

    #[error("Favorite list is full ({0} entries)")]
    FavoritesFull(usize),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for listing operations
pub type Result<T> = std::result::Result<T, StatError>;
