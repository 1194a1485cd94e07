//! Explicit live row counts requested for one table or a whole schema.

use schemastat_core::{RequestContext, Result, RowCounter};
use serde::{Deserialize, Serialize};

/// Live count of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealRowCount {
    pub table: String,
    pub row_count: u64,
}

/// Counts every row of `table`, with no limit.
pub async fn real_row_count<C>(ctx: &RequestContext, counter: &C, table: &str) -> Result<u64>
where
    C: RowCounter + ?Sized,
{
    let rows = counter.count_rows(ctx.schema(), table, None).await?;
    tracing::debug!(schema = ctx.schema(), table, rows, "Counted rows");
    Ok(rows)
}

/// Counts every listed table in order, leaving out the ones that fail.
pub async fn real_row_counts<C, S>(
    ctx: &RequestContext,
    counter: &C,
    tables: &[S],
) -> Vec<RealRowCount>
where
    C: RowCounter + ?Sized,
    S: AsRef<str>,
{
    let mut counts = Vec::with_capacity(tables.len());
    for table in tables {
        let table = table.as_ref();
        match real_row_count(ctx, counter, table).await {
            Ok(row_count) => counts.push(RealRowCount {
                table: table.to_string(),
                row_count,
            }),
            Err(e) => tracing::warn!(
                schema = ctx.schema(),
                table,
                error = %e,
                "Row count failed, leaving table out"
            ),
        }
    }
    counts
}
