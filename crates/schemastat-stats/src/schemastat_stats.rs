//! Schemastat Stats - Table statistics for schema structure listings
//!
//! Turns the raw per-table metadata of a schema into a display-ready
//! listing:
//!
//! - `row_count` - Decides between declared and live row counts per engine family
//! - `aggregate` - Resolves sizes and overhead and sums them per schema
//! - `format` - Human-scaled byte values
//! - `assemble` - Favorites-first ordering, name filtering and pagination
//! - `favorites` - Favorite table membership and synchronization
//!
//! `StructureCollector` ties these together against a `StatsBackend`.

pub mod aggregate;
pub mod assemble;
mod collector;
pub mod favorites;
pub mod format;
mod real_count;
pub mod row_count;

#[cfg(test)]
mod test_support;

pub use aggregate::{Aggregation, SchemaAggregate, aggregate};
pub use assemble::{DisplayList, assemble};
pub use collector::{ListingQuery, StructureCollector, TableListing};
pub use favorites::{
    FavoritesSet, FavoritesSync, FavoritesSynchronizer, FavoritesView, synchronize_favorites,
};
pub use format::{ByteUnit, FormattedBytes, format_byte_down, format_size};
pub use real_count::{RealRowCount, real_row_count, real_row_counts};
pub use row_count::{RowCountEstimate, RowCountEstimator, estimate_row_count};
