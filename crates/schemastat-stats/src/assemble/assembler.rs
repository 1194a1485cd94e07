//! Table list assembler implementation.

use schemastat_core::TableStat;
use serde::{Deserialize, Serialize};

use crate::aggregate::SchemaAggregate;
use crate::favorites::FavoritesSet;

/// One page of a table listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    /// Tables on this page, favorites first.
    pub tables: Vec<TableStat>,
    /// Number of tables passing the filter, across all pages.
    pub total_matching: usize,
    pub page: usize,
    pub page_size: usize,
    /// Totals over every table passing the filter, not just this page.
    pub totals: SchemaAggregate,
}

impl DisplayList {
    /// Number of pages needed for `total_matching` entries.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_matching.div_ceil(self.page_size)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Marks favorites, filters by name, moves favorites to the front and cuts
/// out the requested page.
///
/// Both groups keep their input order. A page past the end or a zero page
/// size yields an empty page rather than an error.
pub fn assemble(
    tables: Vec<TableStat>,
    favorites: &FavoritesSet,
    filter: Option<&str>,
    page: usize,
    page_size: usize,
) -> DisplayList {
    let filter = filter.filter(|f| !f.is_empty());

    let (favored, rest): (Vec<TableStat>, Vec<TableStat>) = tables
        .into_iter()
        .filter(|table| filter.is_none_or(|f| table.name.contains(f)))
        .map(|mut table| {
            table.is_favorite = favorites.contains(&table.schema, &table.name);
            table
        })
        .partition(|table| table.is_favorite);

    let mut ordered = favored;
    ordered.extend(rest);

    let totals = SchemaAggregate::from_tables(&ordered);
    let total_matching = ordered.len();

    let start = page.saturating_mul(page_size).min(total_matching);
    let end = start.saturating_add(page_size).min(total_matching);
    let tables: Vec<TableStat> = ordered.drain(start..end).collect();

    tracing::debug!(
        filter = ?filter,
        total_matching,
        page,
        page_size,
        shown = tables.len(),
        "Assembled display list"
    );

    DisplayList {
        tables,
        total_matching,
        page,
        page_size,
        totals,
    }
}
