//! StreamFlix core: hero carousel scheduling, the catalog provider client,
//! per-screen aggregation and the local watchlist.
#![allow(missing_docs)]

pub mod carousel;
pub mod error;
pub mod faq;
pub mod image;
pub mod pages;
pub mod providers;
pub mod watchlist;

pub use carousel::{
    CarouselConfig, CarouselHandle, CarouselSnapshot, CarouselState, Direction,
    HeroSlide, LookupFailure, ProviderLookup, VideoLookup,
};
pub use error::{CatalogError, Result};
pub use faq::{FaqClient, FaqSettings};
pub use image::{ImageUrlBuilder, PLACEHOLDER_IMAGE};
pub use pages::{HomeFeed, MoviesPage, SearchSession, TvPage};
pub use providers::{MetadataProvider, ProviderError, TmdbProvider, TmdbSettings};
pub use watchlist::{FileStore, KeyValueStore, MemoryStore, Watchlist};

pub use streamflix_model as model;
