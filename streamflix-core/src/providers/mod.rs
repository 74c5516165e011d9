pub mod tmdb;
pub mod traits;

pub use tmdb::{TmdbProvider, TmdbSettings};
pub use traits::{
    DiscoverFilters, MetadataProvider, MovieList, ProviderError, SearchScope,
    TvList,
};
