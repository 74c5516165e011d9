//! Data behind each screen, assembled from a [`MetadataProvider`].
//!
//! [`MetadataProvider`]: crate::providers::MetadataProvider

use streamflix_model::{CatalogItem, Page};

pub mod browse;
pub mod details;
pub mod home;
pub mod search;

pub use browse::{MovieTab, MoviesPage, TvPage, TvTab};
pub use details::{CreditCard, MovieView, PersonView, TvView};
pub use home::HomeFeed;
pub use search::SearchSession;

/// Items shown per row or tab.
pub const ROW_LIMIT: usize = 20;

fn rows(page: Page<CatalogItem>) -> Vec<CatalogItem> {
    let mut results = page.results;
    results.truncate(ROW_LIMIT);
    results
}
