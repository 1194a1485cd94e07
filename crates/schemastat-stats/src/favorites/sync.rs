//! Favorites synchronization against the live table list.

use std::collections::HashSet;

use schemastat_core::{FavoritesStore, StatError, TableRef};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::set::FavoritesSet;

/// Client-facing view of a user's favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesView {
    /// JSON text of the form `{"<user>": [{"db": .., "table": ..}]}`.
    pub favorite_tables: String,
    /// The favorites in stored order.
    pub list: Vec<TableRef>,
    /// Number of favorites.
    pub count: usize,
}

/// Outcome of a synchronization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesSync {
    pub favorites: FavoritesSet,
    pub view: FavoritesView,
    /// Number of stale entries removed.
    pub pruned: usize,
}

/// Drops favorites whose table is not among `candidates` and builds the
/// client view of what remains.
pub fn synchronize_favorites(
    stored: &FavoritesSet,
    user: &str,
    candidates: &[TableRef],
) -> FavoritesSync {
    let live: HashSet<&TableRef> = candidates.iter().collect();
    let mut favorites = stored.clone();
    let pruned = favorites.retain(|entry| live.contains(entry));

    if pruned > 0 {
        tracing::debug!(user, pruned, "Pruned favorites referencing missing tables");
    }

    let view = build_view(&favorites, user);
    FavoritesSync {
        favorites,
        view,
        pruned,
    }
}

fn build_view(favorites: &FavoritesSet, user: &str) -> FavoritesView {
    let entries: Vec<Value> = favorites
        .iter()
        .map(|entry| {
            let mut object = Map::new();
            object.insert("db".into(), Value::String(entry.db.clone()));
            object.insert("table".into(), Value::String(entry.table.clone()));
            Value::Object(object)
        })
        .collect();

    let mut by_user = Map::new();
    by_user.insert(user.to_string(), Value::Array(entries));

    FavoritesView {
        favorite_tables: Value::Object(by_user).to_string(),
        list: favorites.entries().to_vec(),
        count: favorites.len(),
    }
}

/// Store-backed favorites synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoritesSynchronizer {
    capacity: usize,
}

impl FavoritesSynchronizer {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reads the user's stored favorites, seeds them from the client's copy
    /// when the store has none, prunes entries for missing tables and writes
    /// the result back if anything changed.
    ///
    /// Store failures are logged and the in-memory result is returned anyway.
    pub async fn synchronize<S>(
        &self,
        store: &S,
        user: &str,
        client_copy: Option<&FavoritesSet>,
        candidates: &[TableRef],
    ) -> FavoritesSync
    where
        S: FavoritesStore + ?Sized,
    {
        let (stored, read_ok) = match store.read_all(user).await {
            Ok(entries) => (FavoritesSet::from_entries(entries), true),
            Err(e) => {
                tracing::warn!(user, error = %e, "Failed to read stored favorites");
                (FavoritesSet::new(), false)
            }
        };

        let mut merged = stored;
        let mut seeded = false;
        if merged.is_empty() {
            if let Some(client) = client_copy.filter(|c| !c.is_empty()) {
                for entry in client.iter() {
                    match merged.add(&entry.db, &entry.table, self.capacity) {
                        Ok(_) => seeded = true,
                        Err(StatError::FavoritesFull(_)) => break,
                        Err(e) => {
                            tracing::warn!(user, error = %e, "Skipping client favorite");
                        }
                    }
                }
            }
        }

        let sync = synchronize_favorites(&merged, user, candidates);

        if read_ok && (seeded || sync.pruned > 0) {
            if let Err(e) = store.replace_all(user, sync.favorites.entries()).await {
                tracing::warn!(user, error = %e, "Failed to persist synchronized favorites");
            }
        }

        sync
    }
}
