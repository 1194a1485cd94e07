//! Metadata snapshots standing in for a live server connection.
//!
//! A snapshot is a JSON document holding one schema's table status rows
//! plus the answers a live server would give to row count and storage
//! length queries.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use schemastat_core::{
    MetadataSource, Result, RowCounter, StatError, StorageLengths, TableMetadata,
};
use serde::{Deserialize, Serialize};

/// One schema's metadata and live query answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema: String,
    #[serde(default)]
    pub tables: Vec<TableMetadata>,
    /// `SELECT COUNT(*)` results by table name.
    #[serde(default)]
    pub row_counts: HashMap<String, u64>,
    /// `[data_length, index_length]` by table name.
    #[serde(default)]
    pub storage_lengths: HashMap<String, (u64, u64)>,
}

impl Snapshot {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Serves a listing from a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    snapshot: Snapshot,
}

impl SnapshotBackend {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn schema(&self) -> &str {
        &self.snapshot.schema
    }

    /// Names of every table and view, in snapshot order.
    pub fn table_names(&self) -> Vec<String> {
        self.snapshot.tables.iter().map(|t| t.name.clone()).collect()
    }

    /// `schema.table` for every entry, in snapshot order.
    pub fn qualified_names(&self) -> Vec<String> {
        self.snapshot
            .tables
            .iter()
            .map(|t| format!("{}.{}", self.snapshot.schema, t.name))
            .collect()
    }

    fn check_schema(&self, schema: &str) -> Result<()> {
        if schema == self.snapshot.schema {
            Ok(())
        } else {
            Err(StatError::NotFound(format!("schema {}", schema)))
        }
    }
}

#[async_trait]
impl MetadataSource for SnapshotBackend {
    async fn list_table_metadata(&self, schema: &str) -> Result<Vec<TableMetadata>> {
        self.check_schema(schema)
            .map_err(|e| StatError::Metadata(e.to_string()))?;
        Ok(self.snapshot.tables.clone())
    }
}

#[async_trait]
impl RowCounter for SnapshotBackend {
    async fn count_rows(&self, schema: &str, table: &str, limit: Option<u64>) -> Result<u64> {
        self.check_schema(schema)?;
        let rows = self
            .snapshot
            .row_counts
            .get(table)
            .copied()
            .ok_or_else(|| StatError::NotFound(format!("row count for {}", table)))?;
        Ok(limit.map_or(rows, |limit| rows.min(limit)))
    }
}

#[async_trait]
impl StorageLengths for SnapshotBackend {
    async fn storage_lengths(&self, schema: &str, table: &str) -> Result<(u64, u64)> {
        self.check_schema(schema)?;
        self.snapshot
            .storage_lengths
            .get(table)
            .copied()
            .ok_or_else(|| StatError::StorageLengths(format!("no lengths for {}", table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use schemastat_core::Engine;

    const SNAPSHOT: &str = indoc! {r#"
        {
            "schema": "db",
            "tables": [
                {"Name": "table", "Engine": "InnoDB", "Rows": 5, "Data_length": 16384, "Index_length": 10},
                {"TABLE_NAME": "search", "ENGINE": "Mroonga"},
                {"name": "report", "table_type": "VIEW"}
            ],
            "row_counts": {"table": 6},
            "storage_lengths": {"search": [45, 60]}
        }
    "#};

    fn backend() -> SnapshotBackend {
        SnapshotBackend::new(Snapshot::from_json_str(SNAPSHOT).unwrap())
    }

    #[test]
    fn test_parses_both_column_spellings() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();

        assert_eq!(snapshot.tables.len(), 3);
        assert_eq!(snapshot.tables[0].rows, Some(5));
        assert_eq!(snapshot.tables[1].engine.as_deref(), Some("Mroonga"));
        assert_eq!(
            Engine::from_reported(snapshot.tables[1].engine.as_deref()),
            Engine::Mroonga
        );
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let snapshot = Snapshot::from_json_str(r#"{"schema": "empty"}"#).unwrap();
        assert!(snapshot.tables.is_empty());
        assert!(snapshot.row_counts.is_empty());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, StatError::Io(_)));
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(
            backend().qualified_names(),
            vec!["db.table", "db.search", "db.report"]
        );
    }

    #[tokio::test]
    async fn test_counts_respect_limit() {
        let backend = backend();
        assert_eq!(backend.count_rows("db", "table", None).await.unwrap(), 6);
        assert_eq!(backend.count_rows("db", "table", Some(2)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_count_is_not_found() {
        let err = backend().count_rows("db", "report", None).await.unwrap_err();
        assert!(matches!(err, StatError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_storage_lengths() {
        let backend = backend();
        assert_eq!(backend.storage_lengths("db", "search").await.unwrap(), (45, 60));
        assert!(backend.storage_lengths("db", "table").await.is_err());
    }

    #[tokio::test]
    async fn test_other_schema_is_a_metadata_error() {
        let err = backend().list_table_metadata("other").await.unwrap_err();
        assert!(matches!(err, StatError::Metadata(_)));
    }
}
