//! Render-ready projection of a carousel snapshot.

use streamflix_model::{ImageSize, MediaKind};

use super::state::CarouselSnapshot;
use crate::image::ImageUrlBuilder;

/// YouTube embed URL for a looping background trailer without chrome.
pub fn youtube_embed_url(key: &str, muted: bool) -> String {
    let mute = u8::from(muted);
    format!(
        "https://www.youtube.com/embed/{key}?autoplay=1&mute={mute}&loop=1\
         &playlist={key}&controls=0&showinfo=0&rel=0&iv_load_policy=3\
         &modestbranding=1"
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEmbed {
    pub key: String,
    pub muted: bool,
    pub embed_url: String,
}

/// Everything the hero section shows for the current slide.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSlide {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub rating: Option<String>,
    pub year: Option<i32>,
    pub kind: MediaKind,
    pub overview: String,
    /// Backdrop at original size, or the placeholder image.
    pub backdrop_url: String,
    pub has_backdrop: bool,
    pub link: String,
    pub indicators: Vec<Indicator>,
    /// Present only once the trailer has been revealed.
    pub preview: Option<PreviewEmbed>,
    pub show_mute_toggle: bool,
    pub autoplay_active: bool,
}

impl HeroSlide {
    /// `None` for an empty or unmounted carousel.
    pub fn render(
        snapshot: &CarouselSnapshot,
        images: &ImageUrlBuilder,
    ) -> Option<Self> {
        if !snapshot.mounted {
            return None;
        }
        let item = snapshot.current()?;
        let backdrop = images.url(item.backdrop_path.as_deref(), ImageSize::backdrop());

        let preview = snapshot.playing_key().map(|key| PreviewEmbed {
            key: key.to_string(),
            muted: snapshot.muted,
            embed_url: youtube_embed_url(key, snapshot.muted),
        });

        Some(Self {
            index: snapshot.current_index,
            total: snapshot.items.len(),
            title: item.title.clone(),
            rating: item.rating_label(),
            year: item.year(),
            kind: item.kind,
            overview: item.overview.clone(),
            has_backdrop: backdrop.is_some(),
            backdrop_url: backdrop.unwrap_or_else(|| {
                crate::image::PLACEHOLDER_IMAGE.to_string()
            }),
            link: item.link_path(),
            indicators: (0..snapshot.items.len())
                .map(|index| Indicator {
                    index,
                    active: index == snapshot.current_index,
                })
                .collect(),
            show_mute_toggle: preview.is_some(),
            preview,
            autoplay_active: snapshot.autoplay_active,
        })
    }

    pub fn kind_label(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use streamflix_model::CarouselItem;

    use super::*;

    fn snapshot(items: Vec<CarouselItem>) -> CarouselSnapshot {
        CarouselSnapshot {
            items: Arc::from(items),
            current_index: 0,
            is_visible: true,
            is_interacting: false,
            preview_key: None,
            preview_revealed: false,
            muted: true,
            autoplay_active: true,
            mounted: true,
        }
    }

    fn dune() -> CarouselItem {
        CarouselItem {
            id: 438631,
            title: "Dune".into(),
            release_date: Some("2021-09-15".into()),
            rating: Some(7.8),
            backdrop_path: Some("/dune.jpg".into()),
            overview: "Spice.".into(),
            kind: MediaKind::Movie,
        }
    }

    #[test]
    fn embed_url_honours_mute() {
        assert_eq!(
            youtube_embed_url("y", true),
            "https://www.youtube.com/embed/y?autoplay=1&mute=1&loop=1&playlist=y\
             &controls=0&showinfo=0&rel=0&iv_load_policy=3&modestbranding=1"
        );
        assert!(youtube_embed_url("y", false).contains("mute=0"));
    }

    #[test]
    fn static_slide_before_reveal() {
        let mut snap = snapshot(vec![dune(), dune()]);
        snap.preview_key = Some("y".into());
        let slide = HeroSlide::render(&snap, &ImageUrlBuilder::default()).unwrap();
        assert_eq!(slide.title, "Dune");
        assert_eq!(slide.rating.as_deref(), Some("7.8"));
        assert_eq!(slide.year, Some(2021));
        assert_eq!(slide.kind_label(), "movie");
        assert_eq!(slide.link, "/movie/438631");
        assert_eq!(
            slide.backdrop_url,
            "https://image.tmdb.org/t/p/original/dune.jpg"
        );
        assert!(slide.preview.is_none());
        assert!(!slide.show_mute_toggle);
        assert_eq!(
            slide.indicators,
            vec![
                Indicator { index: 0, active: true },
                Indicator { index: 1, active: false }
            ]
        );
    }

    #[test]
    fn revealed_slide_embeds_trailer() {
        let mut snap = snapshot(vec![dune()]);
        snap.preview_key = Some("y".into());
        snap.preview_revealed = true;
        snap.muted = false;
        let slide = HeroSlide::render(&snap, &ImageUrlBuilder::default()).unwrap();
        let preview = slide.preview.unwrap();
        assert_eq!(preview.key, "y");
        assert!(preview.embed_url.contains("mute=0"));
        assert!(slide.show_mute_toggle);
    }

    #[test]
    fn missing_backdrop_uses_placeholder() {
        let mut item = dune();
        item.backdrop_path = None;
        item.rating = None;
        let slide =
            HeroSlide::render(&snapshot(vec![item]), &ImageUrlBuilder::default())
                .unwrap();
        assert!(!slide.has_backdrop);
        assert_eq!(slide.backdrop_url, crate::image::PLACEHOLDER_IMAGE);
        assert_eq!(slide.rating, None);
    }

    #[test]
    fn empty_or_unmounted_renders_nothing() {
        let images = ImageUrlBuilder::default();
        assert!(HeroSlide::render(&snapshot(Vec::new()), &images).is_none());
        let mut snap = snapshot(vec![dune()]);
        snap.mounted = false;
        assert!(HeroSlide::render(&snap, &images).is_none());
    }
}
