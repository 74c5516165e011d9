//! Locally persisted "My List".

pub mod list;
pub mod store;

pub use list::{WATCHLIST_KEY, Watchlist};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
