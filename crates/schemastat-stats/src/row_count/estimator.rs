//! Row-count estimator implementation.
//!
//! Decides, per table, whether the metadata row count can be shown as is or
//! whether a live count is worth issuing.

use schemastat_core::{EngineFamily, ListingConfig, RowCounter, TableStat};
use serde::{Deserialize, Serialize};

/// A resolved row count and whether it is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCountEstimate {
    pub rows: u64,
    pub is_exact: bool,
}

impl RowCountEstimate {
    pub fn exact(rows: u64) -> Self {
        Self {
            rows,
            is_exact: true,
        }
    }

    pub fn approximate(rows: u64) -> Self {
        Self {
            rows,
            is_exact: false,
        }
    }
}

/// Row-count estimator with its exactness thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCountEstimator {
    max_exact_count: u64,
    max_exact_count_views: u64,
}

impl RowCountEstimator {
    /// Creates an estimator with the given threshold and view counting disabled.
    pub fn new(max_exact_count: u64) -> Self {
        Self {
            max_exact_count,
            max_exact_count_views: 0,
        }
    }

    pub fn from_config(config: &ListingConfig) -> Self {
        Self {
            max_exact_count: config.max_exact_count,
            max_exact_count_views: config.max_exact_count_views,
        }
    }

    /// Sets the upper bound for live view counts (0 disables them).
    pub fn with_view_limit(mut self, limit: u64) -> Self {
        self.max_exact_count_views = limit;
        self
    }

    pub fn max_exact_count(&self) -> u64 {
        self.max_exact_count
    }

    /// Whether a count-estimating table with this declared count gets a
    /// live count. Tables with no declared count always do.
    pub fn wants_live_count(&self, declared_rows: Option<u64>) -> bool {
        declared_rows.is_none_or(|rows| rows <= self.max_exact_count)
    }

    /// Resolves the row count for one table.
    ///
    /// A live count is only issued for count-estimating tables at or under
    /// the threshold and for views when view counting is enabled. Failed
    /// live counts fall back to the declared value, marked approximate.
    pub async fn estimate<C>(&self, schema: &str, table: &TableStat, counter: &C) -> RowCountEstimate
    where
        C: RowCounter + ?Sized,
    {
        let declared = table.declared_rows.unwrap_or(0);

        match table.family() {
            EngineFamily::Estimating => {
                if !self.wants_live_count(table.declared_rows) {
                    return RowCountEstimate::approximate(declared);
                }
                match counter.count_rows(schema, &table.name, None).await {
                    Ok(rows) => RowCountEstimate::exact(rows),
                    Err(e) => {
                        tracing::warn!(
                            schema,
                            table = %table.name,
                            error = %e,
                            "Live row count failed, using declared count"
                        );
                        RowCountEstimate::approximate(declared)
                    }
                }
            }
            EngineFamily::FixedRecord | EngineFamily::RowCountOnly => {
                RowCountEstimate::exact(declared)
            }
            EngineFamily::View => {
                let limit = self.max_exact_count_views;
                if limit == 0 {
                    return RowCountEstimate::approximate(declared);
                }
                match counter.count_rows(schema, &table.name, Some(limit)).await {
                    Ok(rows) if rows >= limit => RowCountEstimate::approximate(limit),
                    Ok(rows) => RowCountEstimate::exact(rows),
                    Err(e) => {
                        tracing::warn!(
                            schema,
                            view = %table.name,
                            error = %e,
                            "View row count failed"
                        );
                        RowCountEstimate::approximate(declared)
                    }
                }
            }
            EngineFamily::AuxiliaryLengths | EngineFamily::Unknown => {
                RowCountEstimate::approximate(declared)
            }
        }
    }
}

/// Resolves a single table's row count against `exact_count_threshold`.
pub async fn estimate_row_count<C>(
    schema: &str,
    table: &TableStat,
    exact_count_threshold: u64,
    counter: &C,
) -> RowCountEstimate
where
    C: RowCounter + ?Sized,
{
    RowCountEstimator::new(exact_count_threshold)
        .estimate(schema, table, counter)
        .await
}
