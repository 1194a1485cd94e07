//! Per-table records flowing through a structure listing

use serde::{Deserialize, Serialize};

use crate::engine::{Engine, EngineFamily};

/// Raw per-table metadata as returned by the server's table status listing.
///
/// Every field except the name is optional; absent values are treated as
/// defaults rather than errors. Aliases accept both `information_schema`
/// and `SHOW TABLE STATUS` column spellings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TableMetadata {
    #[serde(alias = "TABLE_NAME", alias = "Name")]
    pub name: String,
    #[serde(default, alias = "ENGINE", alias = "Engine")]
    pub engine: Option<String>,
    #[serde(default, alias = "TABLE_TYPE", alias = "Table_type")]
    pub table_type: Option<String>,
    #[serde(default, alias = "TABLE_ROWS", alias = "Rows")]
    pub rows: Option<u64>,
    #[serde(default, alias = "DATA_LENGTH", alias = "Data_length")]
    pub data_length: Option<u64>,
    #[serde(default, alias = "INDEX_LENGTH", alias = "Index_length")]
    pub index_length: Option<u64>,
    #[serde(default, alias = "DATA_FREE", alias = "Data_free")]
    pub data_free: Option<u64>,
    #[serde(default, alias = "TABLE_COMMENT", alias = "Comment")]
    pub comment: Option<String>,
    #[serde(default)]
    pub is_view: bool,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_lengths(mut self, data_length: u64, index_length: u64) -> Self {
        self.data_length = Some(data_length);
        self.index_length = Some(index_length);
        self
    }

    pub fn with_data_free(mut self, data_free: u64) -> Self {
        self.data_free = Some(data_free);
        self
    }

    pub fn with_table_type(mut self, table_type: impl Into<String>) -> Self {
        self.table_type = Some(table_type.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// How meaningful a table's size figures are for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizeStatus {
    /// Sizes were collected and are accurate.
    Known,
    /// The engine does not report sizes (shown as `-`).
    Unavailable,
    /// The engine is not recognised (shown as `unknown`).
    Unknown,
    /// Statistics were not collected for this table.
    #[default]
    NotCollected,
}

/// Statistics for a single table in a schema listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableStat {
    /// Schema (database) the table lives in.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Storage engine.
    pub engine: Engine,
    /// Row count from metadata; may be stale or estimated.
    pub declared_rows: Option<u64>,
    /// Authoritative row count, once resolved.
    pub exact_rows: Option<u64>,
    /// Data size in bytes.
    pub data_bytes: u64,
    /// Index size in bytes.
    pub index_bytes: u64,
    /// Free space reported by the server, if any.
    pub free_bytes: Option<u64>,
    /// Overhead resolved during aggregation.
    pub overhead_bytes: u64,
    /// Table comment.
    pub comment: String,
    /// Whether this entry is a view.
    pub is_view: bool,
    /// Whether the current user marked this table as a favorite.
    pub is_favorite: bool,
    /// Display status of the size figures.
    pub size_status: SizeStatus,
}

impl TableStat {
    /// Creates a new TableStat with required fields.
    pub fn new(schema: impl Into<String>, name: impl Into<String>, engine: Engine) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            is_view: engine == Engine::Unreported,
            engine,
            declared_rows: None,
            exact_rows: None,
            data_bytes: 0,
            index_bytes: 0,
            free_bytes: None,
            overhead_bytes: 0,
            comment: String::new(),
            is_favorite: false,
            size_status: SizeStatus::NotCollected,
        }
    }

    /// Converts a raw metadata record, defaulting anything missing.
    pub fn from_metadata(schema: impl Into<String>, metadata: TableMetadata) -> Self {
        let engine = Engine::from_reported(metadata.engine.as_deref());
        let typed_as_view = metadata
            .table_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("VIEW") || t.eq_ignore_ascii_case("SYSTEM VIEW"));

        let mut stat = Self::new(schema, metadata.name, engine);
        stat.is_view |= metadata.is_view || typed_as_view;
        stat.declared_rows = metadata.rows;
        stat.data_bytes = metadata.data_length.unwrap_or(0);
        stat.index_bytes = metadata.index_length.unwrap_or(0);
        stat.free_bytes = metadata.data_free;
        stat.comment = metadata.comment.unwrap_or_default();
        stat
    }

    /// Sets the declared row count.
    pub fn with_declared_rows(mut self, rows: u64) -> Self {
        self.declared_rows = Some(rows);
        self
    }

    /// Sets data and index sizes.
    pub fn with_sizes(mut self, data_bytes: u64, index_bytes: u64) -> Self {
        self.data_bytes = data_bytes;
        self.index_bytes = index_bytes;
        self
    }

    /// Sets the reported free space.
    pub fn with_free_bytes(mut self, free_bytes: u64) -> Self {
        self.free_bytes = Some(free_bytes);
        self
    }

    /// Marks the entry as a view.
    pub fn as_view(mut self) -> Self {
        self.is_view = true;
        self
    }

    /// Statistics family, taking the view flag into account.
    pub fn family(&self) -> EngineFamily {
        if self.is_view {
            EngineFamily::View
        } else {
            self.engine.family()
        }
    }

    /// Row count to display: the exact count supersedes the declared one.
    pub fn display_rows(&self) -> Option<u64> {
        self.exact_rows.or(self.declared_rows)
    }

    pub fn is_row_count_exact(&self) -> bool {
        self.exact_rows.is_some()
    }

    /// Data plus index size. Overhead is reported separately.
    pub fn total_size(&self) -> u64 {
        self.data_bytes.saturating_add(self.index_bytes)
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef::new(self.schema.clone(), self.name.clone())
    }
}

/// Reference to a table by schema and name.
///
/// Serialized with the `db`/`table` keys used by stored favorites lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub db: String,
    pub table: String,
}

impl TableRef {
    pub fn new(db: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            table: table.into(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.db, self.table)
    }

    pub fn matches(&self, db: &str, table: &str) -> bool {
        self.db == db && self.table == table
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.db, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_metadata_copies_fields() {
        let metadata = TableMetadata::new("orders")
            .with_engine("InnoDB")
            .with_rows(5)
            .with_lengths(16384, 2048)
            .with_comment("sales");

        let stat = TableStat::from_metadata("shop", metadata);

        assert_eq!(stat.schema, "shop");
        assert_eq!(stat.name, "orders");
        assert_eq!(stat.engine, Engine::InnoDb);
        assert_eq!(stat.declared_rows, Some(5));
        assert_eq!(stat.data_bytes, 16384);
        assert_eq!(stat.index_bytes, 2048);
        assert_eq!(stat.free_bytes, None);
        assert_eq!(stat.comment, "sales");
        assert!(!stat.is_view);
        assert_eq!(stat.size_status, SizeStatus::NotCollected);
    }

    #[test]
    fn test_from_metadata_defaults_missing_fields() {
        let stat = TableStat::from_metadata("shop", TableMetadata::new("t").with_engine("MyISAM"));

        assert_eq!(stat.declared_rows, None);
        assert_eq!(stat.data_bytes, 0);
        assert_eq!(stat.index_bytes, 0);
        assert_eq!(stat.free_bytes, None);
        assert_eq!(stat.comment, "");
    }

    #[test]
    fn test_null_engine_is_view() {
        let stat = TableStat::from_metadata("shop", TableMetadata::new("v_orders"));
        assert!(stat.is_view);
        assert_eq!(stat.family(), EngineFamily::View);
    }

    #[test]
    fn test_table_type_view_is_view() {
        let metadata = TableMetadata::new("v").with_engine("InnoDB").with_table_type("VIEW");
        let stat = TableStat::from_metadata("shop", metadata);
        assert!(stat.is_view);
        assert_eq!(stat.family(), EngineFamily::View);
    }

    #[test]
    fn test_deserialize_information_schema_columns() {
        let json = r#"{
            "TABLE_NAME": "my_table",
            "ENGINE": "Maria",
            "TABLE_TYPE": "BASE TABLE",
            "TABLE_ROWS": 0,
            "TABLE_COMMENT": "test",
            "Data_length": 5000,
            "Index_length": 100,
            "Data_free": 10000
        }"#;
        let metadata: TableMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(
            metadata,
            TableMetadata::new("my_table")
                .with_engine("Maria")
                .with_table_type("BASE TABLE")
                .with_rows(0)
                .with_comment("test")
                .with_lengths(5000, 100)
                .with_data_free(10000)
        );
    }

    #[test]
    fn test_deserialize_null_rows() {
        let json = r#"{"Name": "v", "Engine": null, "Rows": null}"#;
        let metadata: TableMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.rows, None);
        assert_eq!(metadata.engine, None);
    }

    #[test]
    fn test_display_rows_prefers_exact() {
        let mut stat = TableStat::new("db", "t", Engine::InnoDb).with_declared_rows(5);
        assert_eq!(stat.display_rows(), Some(5));
        assert!(!stat.is_row_count_exact());

        stat.exact_rows = Some(6);
        assert_eq!(stat.display_rows(), Some(6));
        assert!(stat.is_row_count_exact());
    }

    #[test]
    fn test_total_size_excludes_overhead() {
        let mut stat = TableStat::new("db", "t", Engine::Aria)
            .with_sizes(16384, 10)
            .with_free_bytes(300);
        stat.overhead_bytes = 300;
        assert_eq!(stat.total_size(), 16394);
    }

    #[test]
    fn test_table_ref_wire_shape() {
        let table_ref = TableRef::new("db", "table");
        let json = serde_json::to_string(&table_ref).unwrap();
        assert_eq!(json, r#"{"db":"db","table":"table"}"#);
        assert_eq!(table_ref.qualified_name(), "db.table");
        assert!(table_ref.matches("db", "table"));
        assert!(!table_ref.matches("db", "tab1e"));
    }
}
