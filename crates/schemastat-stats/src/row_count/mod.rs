//! Row-count estimation.
//!
//! Chooses between the declared metadata row count and a live count,
//! depending on the table's engine family and a configurable threshold.

mod estimator;


pub use estimator::{RowCountEstimate, RowCountEstimator, estimate_row_count};
