//! Structure listing orchestration.
//!
//! Loads a schema's metadata, resolves statistics, synchronizes favorites
//! and cuts out the requested page.

use schemastat_core::{
    FavoritesStore, ListingConfig, RequestContext, Result, StatError, StatsBackend, TableRef,
    TableStat,
};
use serde::{Deserialize, Serialize};

use crate::aggregate::{SchemaAggregate, aggregate};
use crate::assemble::{DisplayList, assemble};
use crate::favorites::{FavoritesSet, FavoritesSynchronizer, FavoritesView};

/// What part of the listing the caller wants to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Substring a table name must contain.
    pub filter: Option<String>,
    /// Zero-based page index.
    pub page: usize,
    /// Page size; the configured `max_table_list` when unset.
    pub page_size: Option<usize>,
    /// Favorites held by the client, used to seed an empty store.
    pub client_favorites: Option<FavoritesSet>,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_client_favorites(mut self, favorites: FavoritesSet) -> Self {
        self.client_favorites = Some(favorites);
        self
    }
}

/// A complete structure listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableListing {
    /// The requested page and the totals of the filtered list.
    pub display: DisplayList,
    /// The user's favorites after pruning.
    pub favorites: FavoritesView,
    /// Totals over the whole schema, ignoring the filter.
    pub schema_totals: SchemaAggregate,
}

/// Builds structure listings from a backend and a favorites store.
#[derive(Debug, Clone, Default)]
pub struct StructureCollector {
    config: ListingConfig,
}

impl StructureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ListingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Request context for `schema` using this collector's configuration.
    pub fn context(&self, schema: impl Into<String>, user: impl Into<String>) -> RequestContext {
        RequestContext::new(schema, user, &self.config)
    }

    /// Produces the listing for `ctx.schema()`.
    ///
    /// Only a metadata failure is returned as an error; every later lookup
    /// falls back to reported figures.
    #[tracing::instrument(skip(self, ctx, backend, favorites, query), fields(schema = %ctx.schema()))]
    pub async fn collect<B, F>(
        &self,
        ctx: &RequestContext,
        backend: &B,
        favorites: &F,
        query: &ListingQuery,
    ) -> Result<TableListing>
    where
        B: StatsBackend + ?Sized,
        F: FavoritesStore + ?Sized,
    {
        let metadata = backend
            .list_table_metadata(ctx.schema())
            .await
            .map_err(|e| match e {
                StatError::Metadata(_) => e,
                other => StatError::Metadata(other.to_string()),
            })?;

        tracing::debug!(entries = metadata.len(), "Loaded table metadata");

        let tables: Vec<TableStat> = metadata
            .into_iter()
            .map(|record| TableStat::from_metadata(ctx.schema(), record))
            .collect();

        let aggregation = aggregate(ctx, tables, backend, backend).await;

        let candidates: Vec<TableRef> = aggregation.tables.iter().map(TableStat::table_ref).collect();
        let sync = FavoritesSynchronizer::new(self.config.num_favorite_tables)
            .synchronize(
                favorites,
                ctx.user(),
                query.client_favorites.as_ref(),
                &candidates,
            )
            .await;

        let page_size = query.page_size.unwrap_or(self.config.max_table_list);
        let page = assemble(
            aggregation.tables,
            &sync.favorites,
            query.filter.as_deref(),
            query.page,
            page_size,
        );

        tracing::info!(
            tables = aggregation.totals.table_count,
            views = aggregation.totals.view_count,
            matching = page.total_matching,
            shown = page.tables.len(),
            "Collected structure listing"
        );

        Ok(TableListing {
            display: page,
            favorites: sync.view,
            schema_totals: aggregation.totals,
        })
    }
}
