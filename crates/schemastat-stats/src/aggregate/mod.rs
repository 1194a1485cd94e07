//! Schema-wide size aggregation.

mod aggregator;


pub use aggregator::{Aggregation, SchemaAggregate, aggregate};
