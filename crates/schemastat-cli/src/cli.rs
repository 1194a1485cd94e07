//! schemastat - table structure listings from the command line
//!
//! Reads a JSON metadata snapshot of one schema and prints the listing a
//! database administration tool would show for it: resolved row counts,
//! sizes, overhead, favorites first, filtered and paginated.

mod favorites_store;
mod logging;
mod output;
mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use schemastat_core::ListingConfig;
use schemastat_stats::{
    ListingQuery, RealRowCount, StructureCollector, real_row_count, real_row_counts,
};
use schemastat_stats::favorites::has_table;

use favorites_store::JsonFavoritesStore;
use snapshot::{Snapshot, SnapshotBackend};

/// Table statistics for a schema snapshot
#[derive(Parser, Debug)]
#[command(name = "schemastat")]
#[command(version, about = "Table structure listings from schema metadata snapshots", long_about = None)]
struct Cli {
    /// Listing configuration file (TOML)
    #[arg(long, global = true, env = "SCHEMASTAT_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging to stderr and JSON log files
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the table listing of a snapshot
    List(ListArgs),
    /// Print live row counts from a snapshot
    Count(CountArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Snapshot file (JSON)
    #[arg(long)]
    snapshot: PathBuf,

    /// Only show tables whose name contains this text
    #[arg(long)]
    filter: Option<String>,

    /// Zero-based page index
    #[arg(long, default_value = "0")]
    page: usize,

    /// Tables per page (defaults to max_table_list)
    #[arg(long = "page-size")]
    page_size: Option<usize>,

    /// User whose favorites are applied
    #[arg(long, env = "USER", default_value = "root")]
    user: String,

    /// Favorites file (JSON)
    #[arg(long)]
    favorites: Option<PathBuf>,

    /// Skip live row counts and size lookups
    #[arg(long = "no-stats")]
    no_stats: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CountArgs {
    /// Snapshot file (JSON)
    #[arg(long)]
    snapshot: PathBuf,

    /// Table to count
    #[arg(long, conflicts_with = "all", required_unless_present = "all")]
    table: Option<String>,

    /// Count every table in the snapshot
    #[arg(long)]
    all: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging_config = if cli.verbose {
        logging::LoggingConfig::development()
    } else {
        logging::LoggingConfig::production()
    };
    logging::init(logging_config).context("failed to initialize logging")?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::List(args) => run_list(config, args).await,
        Command::Count(args) => run_count(config, args).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ListingConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match ListingConfig::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(error = %e, "No default config location, using defaults");
                return Ok(ListingConfig::default());
            }
        },
    };
    ListingConfig::load(&path).with_context(|| format!("failed to load config {}", path.display()))
}

fn load_backend(path: &Path) -> anyhow::Result<SnapshotBackend> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    Ok(SnapshotBackend::new(snapshot))
}

async fn run_list(config: ListingConfig, args: ListArgs) -> anyhow::Result<()> {
    let backend = load_backend(&args.snapshot)?;
    let favorites = match args.favorites {
        Some(path) => JsonFavoritesStore::new(path),
        None => JsonFavoritesStore::new(JsonFavoritesStore::default_path()?),
    };

    let collector = StructureCollector::with_config(config);
    let ctx = collector.context(backend.schema(), &args.user);
    let ctx = if args.no_stats {
        ctx.with_show_stats(false)
    } else {
        ctx
    };

    let mut query = ListingQuery::new().with_page(args.page);
    query.filter = args.filter;
    query.page_size = args.page_size;

    let listing = collector
        .collect(&ctx, &backend, &favorites, &query)
        .await
        .with_context(|| format!("failed to list schema {}", backend.schema()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        println!("{}", output::render_listing(&listing));
    }
    Ok(())
}

async fn run_count(config: ListingConfig, args: CountArgs) -> anyhow::Result<()> {
    let backend = load_backend(&args.snapshot)?;
    let ctx = StructureCollector::with_config(config).context(backend.schema(), "");

    let counts = match args.table {
        Some(table) => {
            if !has_table(&backend.qualified_names(), backend.schema(), &table) {
                anyhow::bail!("table {} is not in schema {}", table, backend.schema());
            }
            let row_count = real_row_count(&ctx, &backend, &table)
                .await
                .with_context(|| format!("failed to count rows of {}", table))?;
            vec![RealRowCount { table, row_count }]
        }
        None => real_row_counts(&ctx, &backend, &backend.table_names()).await,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("{}", output::render_counts(&counts));
    }
    Ok(())
}
