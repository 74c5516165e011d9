//! Image CDN URL construction.

use streamflix_model::ImageSize;

pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Shown wherever an item has no image path.
pub const PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/500x750?text=No+Image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base: String,
}

impl Default for ImageUrlBuilder {
    fn default() -> Self {
        Self::new(TMDB_IMAGE_BASE)
    }
}

impl ImageUrlBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/{size}{path}`, or `None` when the item has no image.
    pub fn url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        let sep = if path.starts_with('/') { "" } else { "/" };
        Some(format!("{}/{}{sep}{path}", self.base, size.as_str()))
    }

    /// Like [`ImageUrlBuilder::url`] but falls back to [`PLACEHOLDER_IMAGE`].
    pub fn url_or_placeholder(
        &self,
        path: Option<&str>,
        size: ImageSize,
    ) -> String {
        self.url(path, size)
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }
}
