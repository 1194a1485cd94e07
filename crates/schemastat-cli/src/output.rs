//! Terminal rendering of listings and row counts

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use schemastat_core::{SizeStatus, TableStat};
use schemastat_stats::{RealRowCount, SchemaAggregate, TableListing, format_size};

/// Row count cell: `~` marks an estimate, `-` a missing count.
pub fn rows_cell(table: &TableStat) -> String {
    match table.display_rows() {
        Some(rows) if table.is_row_count_exact() => rows.to_string(),
        Some(rows) => format!("~{}", rows),
        None => "-".to_string(),
    }
}

pub fn size_cell(table: &TableStat) -> String {
    match table.size_status {
        SizeStatus::Known => format_size(table.total_size()).to_string(),
        SizeStatus::Unknown => "unknown".to_string(),
        SizeStatus::Unavailable | SizeStatus::NotCollected => "-".to_string(),
    }
}

pub fn overhead_cell(overhead_bytes: u64) -> String {
    if overhead_bytes > 0 {
        format_size(overhead_bytes).to_string()
    } else {
        String::new()
    }
}

fn totals_row(totals: &SchemaAggregate) -> Vec<Cell> {
    let rows = if totals.approximate_rows {
        format!("~{}", totals.total_rows)
    } else {
        totals.total_rows.to_string()
    };
    vec![
        Cell::new(format!(
            "{} table(s), {} view(s)",
            totals.table_count, totals.view_count
        )),
        Cell::new(""),
        Cell::new(rows).set_alignment(CellAlignment::Right),
        Cell::new(totals.formatted_size().to_string()).set_alignment(CellAlignment::Right),
        Cell::new(overhead_cell(totals.overhead_bytes)).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]
}

/// Listing as a table with a totals footer and a paging line.
pub fn render_listing(listing: &TableListing) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Engine", "Rows", "Size", "Overhead", "Comment"]);

    for stat in &listing.display.tables {
        let name = if stat.is_favorite {
            format!("* {}", stat.name)
        } else {
            stat.name.clone()
        };
        let engine = if stat.is_view {
            "View".to_string()
        } else {
            stat.engine.to_string()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(engine),
            Cell::new(rows_cell(stat)).set_alignment(CellAlignment::Right),
            Cell::new(size_cell(stat)).set_alignment(CellAlignment::Right),
            Cell::new(overhead_cell(stat.overhead_bytes)).set_alignment(CellAlignment::Right),
            Cell::new(&stat.comment),
        ]);
    }
    table.add_row(totals_row(&listing.display.totals));

    let display = &listing.display;
    format!(
        "{}\nPage {} of {} ({} matching, {} in schema)",
        table,
        display.page + 1,
        display.page_count().max(1),
        display.total_matching,
        listing.schema_totals.entry_count()
    )
}

pub fn render_counts(counts: &[RealRowCount]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Table", "Rows"]);
    for count in counts {
        table.add_row(vec![
            Cell::new(&count.table),
            Cell::new(count.row_count).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}
