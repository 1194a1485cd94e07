//! Integration tests for StructureCollector
//!
//! Runs complete listings against a MockBackend and checks the resolved
//! rows, sizes, favorites and pagination together.

mod common;

use pretty_assertions::assert_eq;
use schemastat_core::{
    Engine, ListingConfig, SizeStatus, StatError, TableMetadata, TableRef,
};
use schemastat_stats::{
    ByteUnit, FavoritesSet, ListingQuery, StructureCollector, real_row_counts,
};

use common::{MemoryFavorites, MockBackend};

fn collector(threshold: u64) -> StructureCollector {
    StructureCollector::with_config(ListingConfig::default().with_max_exact_count(threshold))
}

fn mixed_schema() -> MockBackend {
    MockBackend::new()
        .with_table(
            TableMetadata::new("table")
                .with_engine("InnoDB")
                .with_rows(5)
                .with_lengths(16384, 10),
        )
        .with_table(
            TableMetadata::new("aria_log")
                .with_engine("Aria")
                .with_rows(3)
                .with_lengths(16384, 0)
                .with_data_free(300),
        )
        .with_table(
            TableMetadata::new("search")
                .with_engine("Mroonga")
                .with_rows(7),
        )
        .with_table(TableMetadata::new("big").with_engine("InnoDB").with_rows(1_000))
        .with_table(TableMetadata::new("report").with_table_type("VIEW"))
        .with_row_count("table", 6)
        .with_row_count("big", 1_002)
        .with_row_count("report", 40)
        .with_storage_lengths("search", 45, 60)
}

// ============ collect Tests ============

#[tokio::test]
async fn collect_resolves_each_engine_family() {
    let backend = mixed_schema();
    let collector = collector(10);
    let ctx = collector.context("db", "user");

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    let tables = &listing.display.tables;
    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["table", "aria_log", "search", "big", "report"]);

    let innodb = &tables[0];
    assert_eq!(innodb.display_rows(), Some(6));
    assert!(innodb.is_row_count_exact());
    assert_eq!(innodb.total_size(), 16394);
    assert_eq!(innodb.size_status, SizeStatus::Known);

    let aria = &tables[1];
    assert_eq!(aria.overhead_bytes, 300);
    assert_eq!(aria.total_size(), 16384);

    let mroonga = &tables[2];
    assert_eq!(mroonga.total_size(), 105);
    assert_eq!(backend.length_log(), vec!["search".to_string()]);

    let big = &tables[3];
    assert_eq!(big.display_rows(), Some(1_000));
    assert!(!big.is_row_count_exact());

    let view = &tables[4];
    assert!(view.is_view);
    assert_eq!(view.size_status, SizeStatus::NotCollected);

    // Views are not counted with the default view limit, big is over the threshold.
    assert_eq!(backend.count_log(), vec![("table".to_string(), None)]);
}

#[tokio::test]
async fn collect_totals_sum_every_table() {
    let backend = mixed_schema();
    let collector = collector(10);
    let ctx = collector.context("db", "user");

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    let totals = &listing.schema_totals;
    assert_eq!(totals.table_count, 4);
    assert_eq!(totals.view_count, 1);
    assert_eq!(totals.total_size(), 16394 + 16384 + 105);
    assert_eq!(totals.overhead_bytes, 300);
    assert!(totals.approximate_rows);
    assert_eq!(listing.display.totals, listing.schema_totals);
    assert_eq!(totals.formatted_overhead().value, "300");
    assert_eq!(totals.formatted_overhead().unit, ByteUnit::Bytes);
}

#[tokio::test]
async fn collect_counts_views_up_to_limit() {
    let backend = MockBackend::new()
        .with_table(TableMetadata::new("v_small").with_table_type("VIEW"))
        .with_table(TableMetadata::new("v_large").with_table_type("VIEW"))
        .with_row_count("v_small", 3)
        .with_row_count("v_large", 5_000);
    let collector = StructureCollector::with_config(
        ListingConfig::default().with_max_exact_count_views(100),
    );
    let ctx = collector.context("db", "user");

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    let small = &listing.display.tables[0];
    assert_eq!(small.display_rows(), Some(3));
    assert!(small.is_row_count_exact());

    let large = &listing.display.tables[1];
    assert_eq!(large.display_rows(), Some(100));
    assert!(!large.is_row_count_exact());

    assert!(backend.count_log().iter().all(|(_, limit)| *limit == Some(100)));
}

#[tokio::test]
async fn collect_without_stats_issues_no_queries() {
    let backend = mixed_schema();
    let collector = collector(10);
    let ctx = collector.context("db", "user").with_show_stats(false);

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    assert!(backend.count_log().is_empty());
    assert!(backend.length_log().is_empty());
    assert!(
        listing
            .display
            .tables
            .iter()
            .all(|t| t.size_status == SizeStatus::NotCollected && t.overhead_bytes == 0)
    );
    assert_eq!(listing.display.tables[1].exact_rows, Some(3));
    assert_eq!(listing.display.tables[0].exact_rows, None);
    assert_eq!(listing.schema_totals.total_size(), 0);
    assert_eq!(listing.schema_totals.overhead_bytes, 0);
    assert_eq!(listing.schema_totals.table_count, 4);
}

#[tokio::test]
async fn collect_live_counts_system_schema_tables() {
    let backend = MockBackend::new()
        .with_table(TableMetadata::new("user").with_engine("MyISAM").with_rows(0))
        .with_row_count("user", 12);
    let collector = collector(10);
    let ctx = collector.context("mysql", "root");

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    assert_eq!(listing.display.tables[0].display_rows(), Some(12));
    assert_eq!(backend.counted_tables(), vec!["user".to_string()]);
}

#[tokio::test]
async fn collect_empty_schema_is_valid() {
    let backend = MockBackend::new();
    let collector = collector(10);
    let ctx = collector.context("empty", "user");

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    assert!(listing.display.is_empty());
    assert_eq!(listing.schema_totals.total_size(), 0);
    assert_eq!(listing.favorites.count, 0);
}

#[tokio::test]
async fn collect_metadata_failure_is_an_error() {
    let backend = MockBackend::new().with_metadata_failure();
    let collector = collector(10);
    let ctx = collector.context("db", "user");

    let err = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(err, StatError::Metadata(_)));
}

#[tokio::test]
async fn collect_tolerates_failing_lookups() {
    let backend = MockBackend::new()
        .with_table(
            TableMetadata::new("orphan")
                .with_engine("InnoDB")
                .with_rows(4)
                .with_lengths(10, 0),
        )
        .with_table(
            TableMetadata::new("search")
                .with_engine("Mroonga")
                .with_lengths(1, 2),
        );
    let collector = collector(10);
    let ctx = collector.context("db", "user");

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    let orphan = &listing.display.tables[0];
    assert_eq!(orphan.display_rows(), Some(4));
    assert!(!orphan.is_row_count_exact());
    assert_eq!(listing.display.tables[1].total_size(), 3);
}

// ============ favorites and paging Tests ============

#[tokio::test]
async fn collect_puts_favorites_first_and_prunes_stale_ones() {
    let backend = mixed_schema();
    let favorites = MemoryFavorites::new().with_user(
        "user",
        vec![TableRef::new("db", "big"), TableRef::new("db", "dropped")],
    );
    let collector = collector(10);
    let ctx = collector.context("db", "user");

    let listing = collector
        .collect(&ctx, &backend, &favorites, &ListingQuery::new())
        .await
        .unwrap();

    assert_eq!(listing.display.tables[0].name, "big");
    assert!(listing.display.tables[0].is_favorite);
    assert_eq!(listing.favorites.count, 1);
    assert_eq!(
        listing.favorites.favorite_tables,
        r#"{"user":[{"db":"db","table":"big"}]}"#
    );
    assert_eq!(favorites.stored("user"), vec![TableRef::new("db", "big")]);
}

#[tokio::test]
async fn collect_seeds_favorites_from_client_copy() {
    let backend = mixed_schema();
    let favorites = MemoryFavorites::new();
    let collector = collector(10);
    let ctx = collector.context("db", "user");
    let query = ListingQuery::new()
        .with_client_favorites(FavoritesSet::from_entries([TableRef::new("db", "report")]));

    let listing = collector
        .collect(&ctx, &backend, &favorites, &query)
        .await
        .unwrap();

    assert_eq!(listing.display.tables[0].name, "report");
    assert_eq!(favorites.stored("user"), vec![TableRef::new("db", "report")]);
}

#[tokio::test]
async fn collect_filters_and_paginates() {
    let backend = mixed_schema();
    let collector = collector(10);
    let ctx = collector.context("db", "user");
    let query = ListingQuery::new().with_filter("a").with_page(1).with_page_size(1);

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &query)
        .await
        .unwrap();

    // "table", "aria_log" and "search" contain an "a".
    assert_eq!(listing.display.total_matching, 3);
    assert_eq!(listing.display.page_count(), 3);
    assert_eq!(listing.display.tables.len(), 1);
    assert_eq!(listing.display.tables[0].name, "aria_log");
    assert_eq!(listing.display.totals.table_count, 3);
    assert_eq!(listing.schema_totals.entry_count(), 5);
}

#[tokio::test]
async fn collect_uses_configured_page_size() {
    let backend = mixed_schema();
    let collector =
        StructureCollector::with_config(ListingConfig::default().with_max_table_list(2));
    let ctx = collector.context("db", "user");

    let listing = collector
        .collect(&ctx, &backend, &MemoryFavorites::new(), &ListingQuery::new())
        .await
        .unwrap();

    assert_eq!(listing.display.page_size, 2);
    assert_eq!(listing.display.tables.len(), 2);
}

// ============ real row count Tests ============

#[tokio::test]
async fn real_row_counts_cover_every_countable_table() {
    let backend = mixed_schema();
    let collector = collector(10);
    let ctx = collector.context("db", "user");

    let counts = real_row_counts(&ctx, &backend, &["table", "search", "big"]).await;

    let json = serde_json::to_string(&counts).unwrap();
    assert_eq!(
        json,
        r#"[{"table":"table","row_count":6},{"table":"big","row_count":1002}]"#
    );
}

#[test]
fn engine_names_round_trip_through_metadata() {
    let stat = schemastat_core::TableStat::from_metadata(
        "db",
        TableMetadata::new("t").with_engine("innodb"),
    );
    assert_eq!(stat.engine, Engine::InnoDb);
}
