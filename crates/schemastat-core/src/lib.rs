//! Schemastat Core - Core abstractions for the table structure listing
//!
//! This crate provides the types and traits that the statistics crate and
//! the command line front end depend on. It defines:
//!
//! - `Engine` / `EngineFamily` - Storage engines and how they report statistics
//! - `TableMetadata` / `TableStat` - Raw and resolved per-table records
//! - `MetadataSource`, `RowCounter`, `StorageLengths`, `FavoritesStore` -
//!   Traits for the external collaborators a listing consults
//! - `ListingConfig` / `RequestContext` - Configuration and per-request state

pub mod config;
mod context;
pub mod engine;
mod error;
mod source;
mod table;

pub use config::ListingConfig;
pub use context::*;
pub use engine::{Engine, EngineFamily};
pub use error::*;
pub use source::*;
pub use table::*;
