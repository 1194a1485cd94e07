//! Size aggregator implementation.
//!
//! Folds per-table statistics into schema-wide totals, applying the
//! engine-specific rules for row counts, size lookups and overhead.

use schemastat_core::{
    EngineFamily, RequestContext, RowCounter, SizeStatus, StorageLengths, TableStat,
};
use serde::{Deserialize, Serialize};

use crate::format::{FormattedBytes, format_size};
use crate::row_count::{RowCountEstimate, RowCountEstimator};

/// Running totals over the tables of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAggregate {
    /// Sum of data sizes in bytes.
    pub data_bytes: u64,
    /// Sum of index sizes in bytes.
    pub index_bytes: u64,
    /// Sum of overhead in bytes.
    pub overhead_bytes: u64,
    /// Number of base tables.
    pub table_count: usize,
    /// Number of views.
    pub view_count: usize,
    /// Sum of displayed row counts.
    pub total_rows: u64,
    /// True when at least one row count in the sum is an estimate.
    pub approximate_rows: bool,
}

impl SchemaAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals over an already-resolved table list.
    pub fn from_tables(tables: &[TableStat]) -> Self {
        let mut totals = Self::new();
        for table in tables {
            totals.add_table(table);
        }
        totals
    }

    /// Adds one table's figures.
    pub fn add_table(&mut self, table: &TableStat) {
        self.data_bytes = self.data_bytes.saturating_add(table.data_bytes);
        self.index_bytes = self.index_bytes.saturating_add(table.index_bytes);
        self.overhead_bytes = self.overhead_bytes.saturating_add(table.overhead_bytes);
        self.total_rows = self
            .total_rows
            .saturating_add(table.display_rows().unwrap_or(0));
        self.approximate_rows |= !table.is_row_count_exact();

        if table.is_view {
            self.view_count += 1;
        } else {
            self.table_count += 1;
        }
    }

    /// Data plus index bytes.
    pub fn total_size(&self) -> u64 {
        self.data_bytes.saturating_add(self.index_bytes)
    }

    pub fn has_overhead(&self) -> bool {
        self.overhead_bytes > 0
    }

    pub fn formatted_size(&self) -> FormattedBytes {
        format_size(self.total_size())
    }

    pub fn formatted_overhead(&self) -> FormattedBytes {
        format_size(self.overhead_bytes)
    }

    /// Number of entries folded so far.
    pub fn entry_count(&self) -> usize {
        self.table_count + self.view_count
    }
}

/// Resolved tables together with their totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub tables: Vec<TableStat>,
    pub totals: SchemaAggregate,
}

/// Resolves row counts, sizes and overhead for every table and sums them.
///
/// Tables are processed sequentially in input order. With statistics
/// disabled no live queries are issued and no sizes are summed. Views
/// never contribute sizes. Lookup failures never abort the pass; the
/// affected table keeps its reported figures.
pub async fn aggregate<C, L>(
    ctx: &RequestContext,
    tables: Vec<TableStat>,
    counter: &C,
    lengths: &L,
) -> Aggregation
where
    C: RowCounter + ?Sized,
    L: StorageLengths + ?Sized,
{
    let estimator = RowCountEstimator::from_config(ctx.config());
    let mut totals = SchemaAggregate::new();
    let mut resolved = Vec::with_capacity(tables.len());

    for mut table in tables {
        resolve_table(ctx, &estimator, &mut table, counter, lengths).await;
        totals.add_table(&table);
        resolved.push(table);
    }

    tracing::debug!(
        schema = ctx.schema(),
        tables = totals.table_count,
        views = totals.view_count,
        total_size = totals.total_size(),
        overhead = totals.overhead_bytes,
        "Aggregated table statistics"
    );

    Aggregation {
        tables: resolved,
        totals,
    }
}

async fn resolve_table<C, L>(
    ctx: &RequestContext,
    estimator: &RowCountEstimator,
    table: &mut TableStat,
    counter: &C,
    lengths: &L,
) where
    C: RowCounter + ?Sized,
    L: StorageLengths + ?Sized,
{
    let family = table.family();

    if table.is_view {
        table.data_bytes = 0;
        table.index_bytes = 0;
    }

    if !ctx.show_stats() {
        // Nothing about storage is collected, so nothing is summed either.
        table.data_bytes = 0;
        table.index_bytes = 0;
        table.exact_rows = if family.has_exact_row_count() {
            table.declared_rows
        } else {
            None
        };
        table.overhead_bytes = 0;
        table.size_status = SizeStatus::NotCollected;
        return;
    }

    let estimate = estimator.estimate(ctx.schema(), table, counter).await;
    apply_estimate(table, estimate);

    match family {
        EngineFamily::FixedRecord => {
            if ctx.is_system_schema() {
                // System schema metadata carries placeholder counts.
                match counter.count_rows(ctx.schema(), &table.name, None).await {
                    Ok(rows) => table.exact_rows = Some(rows),
                    Err(e) => tracing::warn!(
                        schema = ctx.schema(),
                        table = %table.name,
                        error = %e,
                        "System table count failed, keeping declared count"
                    ),
                }
            }
            table.overhead_bytes = table.free_bytes.filter(|free| *free > 0).unwrap_or(0);
        }
        EngineFamily::AuxiliaryLengths => {
            match lengths.storage_lengths(ctx.schema(), &table.name).await {
                Ok((data, index)) => {
                    table.data_bytes = data;
                    table.index_bytes = index;
                }
                Err(e) => tracing::warn!(
                    schema = ctx.schema(),
                    table = %table.name,
                    error = %e,
                    "Storage length lookup failed, keeping reported lengths"
                ),
            }
            table.overhead_bytes = 0;
        }
        EngineFamily::Estimating
        | EngineFamily::RowCountOnly
        | EngineFamily::View
        | EngineFamily::Unknown => {
            table.overhead_bytes = 0;
        }
    }

    table.size_status = match family {
        EngineFamily::Estimating | EngineFamily::FixedRecord | EngineFamily::AuxiliaryLengths => {
            SizeStatus::Known
        }
        EngineFamily::RowCountOnly => SizeStatus::Unavailable,
        EngineFamily::Unknown => SizeStatus::Unknown,
        EngineFamily::View => SizeStatus::NotCollected,
    };

    tracing::debug!(
        table = %table.name,
        %family,
        rows = ?table.display_rows(),
        exact = table.is_row_count_exact(),
        size = table.total_size(),
        "Resolved table statistics"
    );
}

fn apply_estimate(table: &mut TableStat, estimate: RowCountEstimate) {
    if estimate.is_exact {
        table.exact_rows = Some(estimate.rows);
    } else {
        table.exact_rows = None;
        if table.declared_rows.is_none() && estimate.rows > 0 {
            table.declared_rows = Some(estimate.rows);
        }
    }
}
