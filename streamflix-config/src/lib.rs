//! Configuration for StreamFlix: file discovery, environment overrides and
//! validation, plus conversion into the settings types the core consumes.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoadError, ConfigSource};
pub use models::{
    CarouselSection, Config, FaqSection, StorageSection, TmdbSection,
};
