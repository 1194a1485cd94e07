//! Display list assembly: favorites marking, filtering, ordering and
//! pagination of an aggregated table list.

mod assembler;


pub use assembler::{DisplayList, assemble};
