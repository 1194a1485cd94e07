//! Per-user favorite tables.

use schemastat_core::{Result, StatError, TableRef};
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of a user's favorite tables.
///
/// Favorites are soft references: nothing guarantees the referenced table
/// still exists, so readers prune against the live table list instead of
/// erroring on dangling entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    entries: Vec<TableRef>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a stored list, dropping duplicates.
    pub fn from_entries(entries: impl IntoIterator<Item = TableRef>) -> Self {
        let mut set = Self::new();
        for entry in entries {
            if !set.entries.contains(&entry) {
                set.entries.push(entry);
            }
        }
        set
    }

    /// Whether `db.table` is a favorite. An empty table name never is.
    pub fn contains(&self, db: &str, table: &str) -> bool {
        !table.is_empty() && self.entries.iter().any(|e| e.matches(db, table))
    }

    /// Appends a favorite, returning `false` if it was already present.
    pub fn add(&mut self, db: &str, table: &str, capacity: usize) -> Result<bool> {
        if self.contains(db, table) {
            return Ok(false);
        }
        if self.entries.len() >= capacity {
            return Err(StatError::FavoritesFull(capacity));
        }
        self.entries.push(TableRef::new(db, table));
        Ok(true)
    }

    /// Removes a favorite, returning whether it was present.
    pub fn remove(&mut self, db: &str, table: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.matches(db, table));
        self.entries.len() != before
    }

    /// Keeps only entries satisfying `keep`; returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&TableRef) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| keep(e));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableRef> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[TableRef] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TableRef> {
        self.entries
    }
}

/// Whether `table` appears in a list of `db.table` qualified names.
pub fn has_table(qualified_names: &[String], db: &str, table: &str) -> bool {
    qualified_names
        .iter()
        .any(|name| name.split_once('.') == Some((db, table)))
}
