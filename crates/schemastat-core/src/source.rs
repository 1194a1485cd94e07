//! Interfaces to the external collaborators a structure listing consults

use crate::{Result, TableMetadata, TableRef};
use async_trait::async_trait;

/// Source of per-table metadata for a schema
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// List table metadata for all tables and views in a schema, in the
    /// order the server returns them
    async fn list_table_metadata(&self, schema: &str) -> Result<Vec<TableMetadata>>;
}

/// Live row counting
#[async_trait]
pub trait RowCounter: Send + Sync {
    /// Count rows in a table. When `limit` is set the count stops there,
    /// so a result equal to `limit` means "at least this many".
    async fn count_rows(&self, schema: &str, table: &str, limit: Option<u64>) -> Result<u64>;
}

/// Secondary data/index length lookup for engines whose metadata
/// listing does not carry usable sizes
#[async_trait]
pub trait StorageLengths: Send + Sync {
    /// Returns `(data_length, index_length)` in bytes
    async fn storage_lengths(&self, schema: &str, table: &str) -> Result<(u64, u64)>;
}

/// Per-user favorites persistence
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Read all favorites stored for a user
    async fn read_all(&self, user: &str) -> Result<Vec<TableRef>>;

    /// Replace a user's favorites wholesale
    async fn replace_all(&self, user: &str, tables: &[TableRef]) -> Result<()>;
}

/// A connection able to serve an entire listing
pub trait StatsBackend: MetadataSource + RowCounter + StorageLengths {}

impl<T> StatsBackend for T where T: MetadataSource + RowCounter + StorageLengths {}
