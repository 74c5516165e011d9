//! Hero carousel: rotation, trailer lookup and delayed preview reveal.
//!
//! [`state`] holds the clock-free state machine, [`runtime`] drives it on
//! Tokio timers, and [`view`] turns snapshots into a renderable slide.

pub mod config;
pub mod lookup;
pub mod runtime;
pub mod state;
pub mod view;

pub use config::CarouselConfig;
pub use lookup::{LookupFailure, ProviderLookup, VideoLookup};
pub use runtime::{CarouselError, CarouselHandle};
pub use state::{
    CarouselSnapshot, CarouselState, Direction, Effect, Event, PreviewRequest,
    Token,
};
pub use view::{HeroSlide, Indicator, PreviewEmbed, youtube_embed_url};
