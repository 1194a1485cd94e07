//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use schemastat_core::{
    FavoritesStore, MetadataSource, Result, RowCounter, StatError, StorageLengths, TableMetadata,
    TableRef,
};

/// Mock backend serving canned metadata, row counts and storage lengths.
///
/// Every live query is recorded so tests can assert which tables were
/// counted and with what limit.
pub struct MockBackend {
    pub metadata: Vec<TableMetadata>,
    pub row_counts: HashMap<String, u64>,
    pub storage_lengths: HashMap<String, (u64, u64)>,
    pub fail_metadata: bool,
    pub count_log: Arc<parking_lot::Mutex<Vec<(String, Option<u64>)>>>,
    pub length_log: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            metadata: vec![],
            row_counts: HashMap::new(),
            storage_lengths: HashMap::new(),
            fail_metadata: false,
            count_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
            length_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    pub fn with_table(mut self, metadata: TableMetadata) -> Self {
        self.metadata.push(metadata);
        self
    }

    pub fn with_row_count(mut self, table: impl Into<String>, rows: u64) -> Self {
        self.row_counts.insert(table.into(), rows);
        self
    }

    pub fn with_storage_lengths(mut self, table: impl Into<String>, data: u64, index: u64) -> Self {
        self.storage_lengths.insert(table.into(), (data, index));
        self
    }

    pub fn with_metadata_failure(mut self) -> Self {
        self.fail_metadata = true;
        self
    }

    pub fn count_log(&self) -> Vec<(String, Option<u64>)> {
        self.count_log.lock().clone()
    }

    pub fn counted_tables(&self) -> Vec<String> {
        self.count_log.lock().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn length_log(&self) -> Vec<String> {
        self.length_log.lock().clone()
    }
}

#[async_trait]
impl MetadataSource for MockBackend {
    async fn list_table_metadata(&self, _schema: &str) -> Result<Vec<TableMetadata>> {
        if self.fail_metadata {
            return Err(StatError::Other("connection lost".into()));
        }
        Ok(self.metadata.clone())
    }
}

#[async_trait]
impl RowCounter for MockBackend {
    async fn count_rows(&self, _schema: &str, table: &str, limit: Option<u64>) -> Result<u64> {
        self.count_log.lock().push((table.to_string(), limit));
        let rows = self
            .row_counts
            .get(table)
            .copied()
            .ok_or_else(|| StatError::RowCount(format!("no count for {}", table)))?;
        Ok(limit.map_or(rows, |limit| rows.min(limit)))
    }
}

#[async_trait]
impl StorageLengths for MockBackend {
    async fn storage_lengths(&self, _schema: &str, table: &str) -> Result<(u64, u64)> {
        self.length_log.lock().push(table.to_string());
        self.storage_lengths
            .get(table)
            .copied()
            .ok_or_else(|| StatError::StorageLengths(format!("no lengths for {}", table)))
    }
}

/// In-memory favorites store.
#[derive(Default)]
pub struct MemoryFavorites {
    pub entries: parking_lot::Mutex<HashMap<String, Vec<TableRef>>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: &str, entries: Vec<TableRef>) -> Self {
        self.entries.lock().insert(user.to_string(), entries);
        self
    }

    pub fn stored(&self, user: &str) -> Vec<TableRef> {
        self.entries.lock().get(user).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavorites {
    async fn read_all(&self, user: &str) -> Result<Vec<TableRef>> {
        Ok(self.stored(user))
    }

    async fn replace_all(&self, user: &str, tables: &[TableRef]) -> Result<()> {
        self.entries.lock().insert(user.to_string(), tables.to_vec());
        Ok(())
    }
}
