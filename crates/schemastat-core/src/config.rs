//! Listing configuration
//!
//! Settings are read from a TOML file. Every key is optional; missing keys
//! take their defaults, and a missing file yields the default configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Result, StatError};

/// Configuration for table structure listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Tables of count-estimating engines with at most this many declared
    /// rows are counted live.
    pub max_exact_count: u64,
    /// Upper bound for live view counts; 0 disables counting views.
    pub max_exact_count_views: u64,
    /// Whether size statistics are collected at all.
    pub show_stats: bool,
    /// Default number of tables per page.
    pub max_table_list: usize,
    /// Maximum number of favorite tables per user.
    pub num_favorite_tables: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_exact_count: 50_000,
            max_exact_count_views: 0,
            show_stats: true,
            max_table_list: 250,
            num_favorite_tables: 10,
        }
    }
}

impl ListingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_exact_count(mut self, count: u64) -> Self {
        self.max_exact_count = count;
        self
    }

    pub fn with_max_exact_count_views(mut self, count: u64) -> Self {
        self.max_exact_count_views = count;
        self
    }

    pub fn with_show_stats(mut self, show: bool) -> Self {
        self.show_stats = show;
        self
    }

    pub fn with_max_table_list(mut self, size: usize) -> Self {
        self.max_table_list = size;
        self
    }

    pub fn with_num_favorite_tables(mut self, count: usize) -> Self {
        self.num_favorite_tables = count;
        self
    }

    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// `<config dir>/schemastat/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("schemastat").join("config.toml"))
            .ok_or_else(|| StatError::Configuration("Could not determine config directory".into()))
    }

    fn validate(&self) -> Result<()> {
        if self.max_table_list == 0 {
            return Err(StatError::Configuration(
                "max_table_list must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
