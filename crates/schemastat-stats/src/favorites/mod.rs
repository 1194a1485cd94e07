//! Favorite tables: membership, capacity and synchronization.

mod set;
mod sync;


pub use set::{FavoritesSet, has_table};
pub use sync::{FavoritesSync, FavoritesSynchronizer, FavoritesView, synchronize_favorites};
