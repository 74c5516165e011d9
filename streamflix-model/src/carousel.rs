use crate::catalog::{CatalogItem, parse_year};
use crate::media_kind::MediaKind;

/// A slide of the hero carousel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselItem {
    pub id: u64,
    pub title: String,
    /// Raw release or first-air date the year label is derived from.
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub kind: MediaKind,
}

impl CarouselItem {
    /// Builds a slide from a list entry. People have no trailers or
    /// backdrops and are skipped.
    pub fn from_catalog(item: &CatalogItem) -> Option<Self> {
        let kind = item.kind();
        if !kind.is_title() {
            return None;
        }
        Some(Self {
            id: item.id,
            title: item.display_title().to_string(),
            release_date: item.release_date().map(str::to_string),
            rating: item.vote_average,
            backdrop_path: item.backdrop_path.clone(),
            overview: item.overview.clone().unwrap_or_default(),
            kind,
        })
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_year)
    }

    pub fn rating_label(&self) -> Option<String> {
        self.rating.map(|v| format!("{v:.1}"))
    }

    pub fn link_path(&self) -> String {
        format!("/{}/{}", self.kind, self.id)
    }
}
