//! Storage engines and the statistics-reporting families they belong to.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Storage engine identifier as reported by the server's table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Engine {
    InnoDb,
    TokuDb,
    MyIsam,
    Isam,
    Heap,
    Memory,
    Archive,
    Aria,
    Maria,
    Mroonga,
    MrgMyIsam,
    Merge,
    BerkeleyDb,
    /// The server reported `NULL` (typical for views).
    Unreported,
    /// Any engine this listing has no special handling for.
    Other(String),
}

/// Category of engines sharing the same statistics-reporting behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineFamily {
    /// Row count in metadata is an estimate; data and index sizes are accurate.
    Estimating,
    /// Fixed-width record engines: exact row counts and free-space overhead.
    FixedRecord,
    /// Data and index lengths must be fetched with a separate per-table query.
    AuxiliaryLengths,
    /// Only the row count is accurate; sizes are not reported.
    RowCountOnly,
    /// Views have no storage and must be counted live.
    View,
    /// Nothing is known about this engine's statistics.
    Unknown,
}

impl Engine {
    /// Parse a server-reported engine name. Matching ignores ASCII case.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "" | "NULL" => Engine::Unreported,
            "INNODB" => Engine::InnoDb,
            "TOKUDB" => Engine::TokuDb,
            "MYISAM" => Engine::MyIsam,
            "ISAM" => Engine::Isam,
            "HEAP" => Engine::Heap,
            "MEMORY" => Engine::Memory,
            "ARCHIVE" => Engine::Archive,
            "ARIA" => Engine::Aria,
            "MARIA" => Engine::Maria,
            "MROONGA" => Engine::Mroonga,
            "MRG_MYISAM" => Engine::MrgMyIsam,
            "MERGE" => Engine::Merge,
            "BERKELEYDB" => Engine::BerkeleyDb,
            _ => Engine::Other(trimmed.to_string()),
        }
    }

    /// Build from an optional metadata field; a missing engine is `Unreported`.
    pub fn from_reported(name: Option<&str>) -> Self {
        name.map(Self::parse).unwrap_or(Engine::Unreported)
    }

    /// Canonical server spelling, `None` for `Unreported`.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Engine::InnoDb => "InnoDB",
            Engine::TokuDb => "TokuDB",
            Engine::MyIsam => "MyISAM",
            Engine::Isam => "ISAM",
            Engine::Heap => "HEAP",
            Engine::Memory => "MEMORY",
            Engine::Archive => "ARCHIVE",
            Engine::Aria => "Aria",
            Engine::Maria => "Maria",
            Engine::Mroonga => "Mroonga",
            Engine::MrgMyIsam => "MRG_MyISAM",
            Engine::Merge => "MERGE",
            Engine::BerkeleyDb => "BerkeleyDB",
            Engine::Unreported => return None,
            Engine::Other(name) => name.as_str(),
        };
        Some(name)
    }

    /// Statistics family of this engine.
    pub fn family(&self) -> EngineFamily {
        match self {
            Engine::InnoDb | Engine::TokuDb => EngineFamily::Estimating,
            Engine::MyIsam
            | Engine::Isam
            | Engine::Heap
            | Engine::Memory
            | Engine::Archive
            | Engine::Aria
            | Engine::Maria => EngineFamily::FixedRecord,
            Engine::Mroonga => EngineFamily::AuxiliaryLengths,
            Engine::MrgMyIsam | Engine::Merge | Engine::BerkeleyDb => EngineFamily::RowCountOnly,
            Engine::Unreported => EngineFamily::View,
            Engine::Other(_) => EngineFamily::Unknown,
        }
    }
}

impl EngineFamily {
    /// Whether the metadata row count of this family is always exact.
    pub fn has_exact_row_count(&self) -> bool {
        matches!(self, EngineFamily::FixedRecord | EngineFamily::RowCountOnly)
    }

    /// Whether this family reports free space that counts as overhead.
    pub fn reports_overhead(&self) -> bool {
        matches!(self, EngineFamily::FixedRecord)
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "-"),
        }
    }
}

impl std::fmt::Display for EngineFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineFamily::Estimating => write!(f, "Estimating"),
            EngineFamily::FixedRecord => write!(f, "Fixed record"),
            EngineFamily::AuxiliaryLengths => write!(f, "Auxiliary lengths"),
            EngineFamily::RowCountOnly => write!(f, "Row count only"),
            EngineFamily::View => write!(f, "View"),
            EngineFamily::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Serialize for Engine {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Engine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(Engine::from_reported(name.as_deref()))
    }
}
