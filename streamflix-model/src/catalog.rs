use chrono::{Datelike, NaiveDate};

use crate::media_kind::MediaKind;

/// One entry of a list, trending, discover or search response.
///
/// Movies carry `title`/`release_date`, shows carry `name`/`first_air_date`
/// and people carry `name`/`profile_path`. `media_type` is only present on
/// mixed responses (trending "all", multi search).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogItem {
    pub id: u64,
    pub media_type: Option<MediaKind>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub profile_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genre_ids: Vec<u32>,
    pub known_for_department: Option<String>,
}

impl CatalogItem {
    /// Movie title, falling back to the show/person name.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Explicit `media_type`, otherwise inferred: a record with a title is a
    /// movie, anything else is a show.
    pub fn kind(&self) -> MediaKind {
        self.media_type.unwrap_or(if self.title.is_some() {
            MediaKind::Movie
        } else {
            MediaKind::Tv
        })
    }

    /// Like [`CatalogItem::kind`] but lets a page-level hint win over the
    /// title heuristic when the record has no `media_type`.
    pub fn kind_or(&self, hint: MediaKind) -> MediaKind {
        self.media_type.unwrap_or(hint)
    }

    /// First non-empty release or first-air date.
    pub fn release_date(&self) -> Option<&str> {
        [self.release_date.as_deref(), self.first_air_date.as_deref()]
            .into_iter()
            .flatten()
            .find(|d| !d.trim().is_empty())
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date().and_then(parse_year)
    }

    /// Rating rendered with one decimal (`"7.3"`); `None` when unrated.
    pub fn rating_label(&self) -> Option<String> {
        self.vote_average.map(|v| format!("{v:.1}"))
    }

    pub fn link_path(&self) -> String {
        format!("/{}/{}", self.kind(), self.id)
    }
}

/// Extracts the year from an ISO `YYYY-MM-DD` date (or a bare `YYYY`).
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }
    raw.get(..4).and_then(|y| y.parse().ok())
}

/// Paged list envelope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page<T> {
    #[cfg_attr(feature = "serde", serde(default = "first_page"))]
    pub page: u32,
    #[cfg_attr(feature = "serde", serde(default = "Vec::new"))]
    pub results: Vec<T>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_pages: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_results: u32,
}

#[cfg(feature = "serde")]
fn first_page() -> u32 {
    1
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Leading `n` results, the way list rows are rendered.
    pub fn take(&self, n: usize) -> &[T] {
        &self.results[..self.results.len().min(n)]
    }
}

/// A title in a person's filmography.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditedWork {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub item: CatalogItem,
    pub character: Option<String>,
    pub job: Option<String>,
}
