use crate::catalog::CatalogItem;
use crate::media_kind::MediaKind;

/// Trimmed record kept in the local watchlist.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchlistEntry {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_kind"))]
    pub media_type: MediaKind,
}

#[cfg(feature = "serde")]
fn default_kind() -> MediaKind {
    MediaKind::Movie
}

impl WatchlistEntry {
    pub fn from_catalog(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            title: item.display_title().to_string(),
            poster_path: item.poster_path.clone(),
            vote_average: item.vote_average,
            release_date: item.release_date().map(str::to_string),
            media_type: item.kind(),
        }
    }

    /// Same title, regardless of the snapshot fields.
    pub fn same_title(&self, other: &WatchlistEntry) -> bool {
        self.id == other.id && self.media_type == other.media_type
    }

    pub fn link_path(&self) -> String {
        format!("/{}/{}", self.media_type, self.id)
    }
}
