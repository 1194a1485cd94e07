//! Per-request state for a structure listing

use crate::ListingConfig;

const SYSTEM_SCHEMAS: [&str; 4] = ["information_schema", "performance_schema", "mysql", "sys"];

/// Returns true for the server's built-in schemas.
pub fn is_system_schema(schema: &str) -> bool {
    SYSTEM_SCHEMAS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(schema))
}

/// Immutable state describing one listing request.
///
/// Built once by the request handler and passed by reference into every
/// estimator, aggregator and assembler call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    schema: String,
    user: String,
    show_stats: bool,
    is_system_schema: bool,
    config: ListingConfig,
}

impl RequestContext {
    pub fn new(schema: impl Into<String>, user: impl Into<String>, config: &ListingConfig) -> Self {
        let schema = schema.into();
        Self {
            is_system_schema: is_system_schema(&schema),
            schema,
            user: user.into(),
            show_stats: config.show_stats,
            config: config.clone(),
        }
    }

    /// Override whether statistics are collected for this request
    pub fn with_show_stats(mut self, show_stats: bool) -> Self {
        self.show_stats = show_stats;
        self
    }

    /// Override system schema detection
    pub fn with_system_schema(mut self, is_system_schema: bool) -> Self {
        self.is_system_schema = is_system_schema;
        self
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn show_stats(&self) -> bool {
        self.show_stats
    }

    pub fn is_system_schema(&self) -> bool {
        self.is_system_schema
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }
}
