//! File-backed favorites persistence

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use schemastat_core::{FavoritesStore, Result, StatError, TableRef};

type FavoritesFile = BTreeMap<String, Vec<TableRef>>;

/// Stores every user's favorites in one JSON file of `{user: [TableRef]}`.
#[derive(Debug, Clone)]
pub struct JsonFavoritesStore {
    path: PathBuf,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/schemastat/favorites.json`
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join("schemastat").join("favorites.json"))
            .ok_or_else(|| StatError::Configuration("no local data directory".into()))
    }

    async fn read_file(&self) -> Result<FavoritesFile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(FavoritesFile::new()),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StatError::Favorites(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FavoritesFile::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FavoritesStore for JsonFavoritesStore {
    async fn read_all(&self, user: &str) -> Result<Vec<TableRef>> {
        Ok(self.read_file().await?.remove(user).unwrap_or_default())
    }

    async fn replace_all(&self, user: &str, tables: &[TableRef]) -> Result<()> {
        let mut file = self.read_file().await?;
        file.insert(user.to_string(), tables.to_vec());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&file)?;
        tokio::fs::write(&self.path, content).await?;

        tracing::debug!(
            user,
            count = tables.len(),
            path = %self.path.display(),
            "Saved favorites"
        );
        Ok(())
    }
}
