//! Core data model definitions shared across StreamFlix crates.
#![allow(missing_docs)]

pub mod carousel;
pub mod catalog;
pub mod details;
pub mod error;
pub mod faq;
pub mod format;
pub mod genres;
pub mod image;
pub mod media_kind;
pub mod video;
pub mod watch;

// Intentionally curated re-exports for downstream consumers.
pub use carousel::CarouselItem;
pub use catalog::{CatalogItem, CreditedWork, Page};
pub use details::{
    CastMember, Creator, Credits, CrewMember, Episode, Genre, GenreList,
    ImageFile, Images, MovieDetails, Network, PersonCredits, PersonDetails,
    ProductionCompany, SeasonDetails, SeasonSummary, TvDetails,
};
pub use error::{ModelError, Result as ModelResult};
pub use faq::{FaqEntry, FaqResponse};
pub use format::{format_currency, format_date, format_runtime};
pub use genres::{genre_name, genre_names};
pub use image::{BackdropSize, ImageSize, LogoSize, PosterSize, ProfileSize};
pub use media_kind::{MediaKind, TimeWindow, TrendingScope};
pub use video::{VideoDescriptor, VideoList, find_trailer};
pub use watch::WatchlistEntry;
