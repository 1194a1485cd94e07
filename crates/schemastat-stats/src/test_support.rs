//! Mock collaborators shared by the unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use schemastat_core::{
    FavoritesStore, Result, RowCounter, StatError, StorageLengths, TableRef,
};

/// Row counter returning a fixed count per table, failing for unknown ones.
pub struct MockCounter {
    counts: HashMap<String, u64>,
    default_count: Option<u64>,
    calls: Mutex<Vec<(String, Option<u64>)>>,
}

impl MockCounter {
    /// Every table counts as `count`.
    pub fn always(count: u64) -> Self {
        Self {
            counts: HashMap::new(),
            default_count: Some(count),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every count fails.
    pub fn failing() -> Self {
        Self {
            counts: HashMap::new(),
            default_count: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_count(mut self, table: &str, count: u64) -> Self {
        self.counts.insert(table.to_string(), count);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<(String, Option<u64>)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RowCounter for MockCounter {
    async fn count_rows(&self, _schema: &str, table: &str, limit: Option<u64>) -> Result<u64> {
        self.calls.lock().push((table.to_string(), limit));
        let count = self
            .counts
            .get(table)
            .copied()
            .or(self.default_count)
            .ok_or_else(|| StatError::NotFound(format!("table {}", table)))?;
        Ok(match limit {
            Some(limit) => count.min(limit),
            None => count,
        })
    }
}

/// Storage length lookup with per-table answers.
#[derive(Default)]
pub struct MockLengths {
    lengths: HashMap<String, (u64, u64)>,
    calls: AtomicUsize,
}

impl MockLengths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lengths(mut self, table: &str, data: u64, index: u64) -> Self {
        self.lengths.insert(table.to_string(), (data, index));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageLengths for MockLengths {
    async fn storage_lengths(&self, _schema: &str, table: &str) -> Result<(u64, u64)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lengths
            .get(table)
            .copied()
            .ok_or_else(|| StatError::StorageLengths(format!("no lengths for {}", table)))
    }
}

/// In-memory favorites store that can be made to fail.
#[derive(Default)]
pub struct MockFavoritesStore {
    pub entries: Mutex<HashMap<String, Vec<TableRef>>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub writes: AtomicUsize,
}

impl MockFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(self, user: &str, entries: Vec<TableRef>) -> Self {
        self.entries.lock().insert(user.to_string(), entries);
        self
    }

    pub fn stored(&self, user: &str) -> Vec<TableRef> {
        self.entries.lock().get(user).cloned().unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FavoritesStore for MockFavoritesStore {
    async fn read_all(&self, user: &str) -> Result<Vec<TableRef>> {
        if self.fail_reads {
            return Err(StatError::Favorites("store unavailable".into()));
        }
        Ok(self.stored(user))
    }

    async fn replace_all(&self, user: &str, tables: &[TableRef]) -> Result<()> {
        if self.fail_writes {
            return Err(StatError::Favorites("store is read-only".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().insert(user.to_string(), tables.to_vec());
        Ok(())
    }
}
